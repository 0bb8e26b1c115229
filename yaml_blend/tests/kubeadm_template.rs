//! End-to-end blend of the kubeadm hardening template.
//!
//! Only the API server's secure port is overridden; every other entry, its
//! order, and each sequence must pass through untouched.

use anyhow::{Context, Result, ensure};
use rstest::{fixture, rstest};
use yaml_blend::{BlendOptions, Codec, Mapping, SaphyrCodec, Value, blend};
use test_helpers::fixtures::{
    KUBEADM_TEMPLATE, SECURE_PORT_BLENDED, SECURE_PORT_ENCODED, SECURE_PORT_OVERRIDE,
    UNKNOWN_KEYS_OVERRIDE,
};

fn decode(text: impl AsRef<[u8]>) -> Result<Mapping> {
    SaphyrCodec
        .decode(text.as_ref(), &BlendOptions::default())
        .context("decode fixture")
}

fn key_names(mapping: &Mapping) -> Vec<String> {
    mapping.keys().map(ToString::to_string).collect()
}

#[fixture]
fn blended() -> Result<Value> {
    let bytes = blend(
        KUBEADM_TEMPLATE.as_bytes(),
        SECURE_PORT_OVERRIDE.as_bytes(),
    )?;
    Ok(Value::from(decode(bytes)?))
}

#[rstest]
fn secure_port_is_overridden(blended: Result<Value>) -> Result<()> {
    let tree = blended?;
    let port = tree.lookup(&["kubeadmconfig", "apiServer", "extraArgs", "secure-port"]);
    ensure!(
        port == Some(&Value::from("6666")),
        "expected secure-port to be \"6666\", got {port:?}"
    );
    Ok(())
}

#[rstest]
fn result_matches_expected_document(blended: Result<Value>) -> Result<()> {
    let expected = Value::from(decode(SECURE_PORT_BLENDED)?);
    ensure!(blended? == expected, "blend result differs from expected fixture");
    Ok(())
}

#[rstest]
fn default_codec_writes_expected_bytes() -> Result<()> {
    let bytes = blend(
        KUBEADM_TEMPLATE.as_bytes(),
        SECURE_PORT_OVERRIDE.as_bytes(),
    )?;
    let text = String::from_utf8(bytes)?;
    ensure!(
        text == SECURE_PORT_ENCODED,
        "unexpected encoding:\n{text}"
    );
    Ok(())
}

#[rstest]
fn expected_bytes_decode_to_expected_document() -> Result<()> {
    ensure!(
        decode(SECURE_PORT_ENCODED)? == decode(SECURE_PORT_BLENDED)?,
        "byte fixture and structural fixture disagree"
    );
    Ok(())
}

#[rstest]
#[case(&[])]
#[case(&["kubeadmconfig"])]
#[case(&["kubeadmconfig", "apiServer"])]
#[case(&["kubeadmconfig", "apiServer", "extraArgs"])]
#[case(&["kubeadmconfig", "controllerManager", "extraArgs"])]
#[case(&["kubeadmconfig", "kubeletExtraArgs"])]
fn key_order_matches_template(
    blended: Result<Value>,
    #[case] path: &[&str],
) -> Result<()> {
    let template = Value::from(decode(KUBEADM_TEMPLATE)?);
    let tree = blended?;
    let expected = template
        .lookup(path)
        .and_then(Value::as_mapping)
        .context("template mapping")?;
    let actual = tree
        .lookup(path)
        .and_then(Value::as_mapping)
        .context("blended mapping")?;
    ensure!(
        key_names(actual) == key_names(expected),
        "key order changed at {path:?}"
    );
    Ok(())
}

#[rstest]
#[case("extraVolumes", &["kubeadmconfig", "apiServer", "extraVolumes"])]
#[case("files", &["kubeadmconfig", "files"])]
#[case("preKubeadmCommands", &["kubeadmconfig", "preKubeadmCommands"])]
#[case("postKubeadmCommands", &["kubeadmconfig", "postKubeadmCommands"])]
fn sequences_pass_through(
    blended: Result<Value>,
    #[case] name: &str,
    #[case] path: &[&str],
) -> Result<()> {
    let template = Value::from(decode(KUBEADM_TEMPLATE)?);
    let tree = blended?;
    let before = template.lookup(path).context("template sequence")?;
    ensure!(
        matches!(before, Value::Sequence(_)),
        "{name} should be a sequence"
    );
    ensure!(
        tree.lookup(path) == Some(before),
        "{name} changed during blend"
    );
    Ok(())
}

#[rstest]
fn unknown_override_keys_are_ignored() -> Result<()> {
    let bytes = blend(
        KUBEADM_TEMPLATE.as_bytes(),
        UNKNOWN_KEYS_OVERRIDE.as_bytes(),
    )?;
    let tree = Value::from(decode(bytes)?);
    let template = Value::from(decode(KUBEADM_TEMPLATE)?);
    ensure!(tree == template, "override-only keys leaked into the result");
    ensure!(tree.lookup(&["unrelated"]).is_none(), "top-level key added");
    ensure!(
        tree.lookup(&["kubeadmconfig", "etcd"]).is_none(),
        "nested key added"
    );
    Ok(())
}
