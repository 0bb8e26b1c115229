//! Behavioural properties of `blend` over small hand-written documents.

use anyhow::{Context, Result, ensure};
use rstest::rstest;
use yaml_blend::{BlendOptions, Codec, Mapping, SaphyrCodec, Value, blend};

const BASE: &str = "\
service:
  name: api
  replicas: 2
  ports:
    - 80
    - 443
  limits:
    cpu: 500m
    memory: 256Mi
logging:
  level: info
  format: json
enabled: true
";

fn decode(text: impl AsRef<[u8]>) -> Result<Mapping> {
    SaphyrCodec
        .decode(text.as_ref(), &BlendOptions::default())
        .context("decode document")
}

fn encode(mapping: &Mapping) -> Result<Vec<u8>> {
    SaphyrCodec.encode(mapping).context("encode document")
}

fn blend_tree(base: &str, overrides: &str) -> Result<Value> {
    let bytes = blend(base.as_bytes(), overrides.as_bytes())?;
    Ok(Value::from(decode(bytes)?))
}

/// Collects every key path in document order, depth first.
fn key_paths(mapping: &Mapping, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in mapping.iter() {
        let path = format!("{prefix}/{key}");
        out.push(path.clone());
        if let Some(nested) = value.as_mapping() {
            key_paths(nested, &path, out);
        }
    }
}

fn all_paths(tree: &Value) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(mapping) = tree.as_mapping() {
        key_paths(mapping, "", &mut out);
    }
    out
}

#[rstest]
#[case("service:\n  replicas: 5\n")]
#[case("logging:\n  format: text\n  level: debug\n")]
#[case("enabled: false\nservice:\n  limits:\n    memory: 1Gi\n")]
#[case("new: key\nservice:\n  extra: 1\n")]
#[case("service: flattened\n")]
fn key_paths_never_grow_or_reorder(#[case] overrides: &str) -> Result<()> {
    let before = all_paths(&Value::from(decode(BASE)?));
    let after = all_paths(&blend_tree(BASE, overrides)?);
    ensure!(
        after.iter().all(|path| before.contains(path)),
        "blend introduced keys: {after:?}"
    );
    let surviving: Vec<_> = before.iter().filter(|path| after.contains(path)).collect();
    let ordered: Vec<_> = after.iter().collect();
    ensure!(surviving == ordered, "blend reordered keys: {after:?}");
    Ok(())
}

#[rstest]
#[case(&["service", "replicas"], "service:\n  replicas: 5\n", Value::from(5_i64))]
#[case(&["logging", "level"], "logging:\n  level: debug\n", Value::from("debug"))]
#[case(&["enabled"], "enabled: false\n", Value::from(false))]
#[case(
    &["service", "ports"],
    "service:\n  ports: [8080]\n",
    Value::Sequence(vec![Value::from(8080_i64)])
)]
fn override_values_win(
    #[case] path: &[&str],
    #[case] overrides: &str,
    #[case] expected: Value,
) -> Result<()> {
    let tree = blend_tree(BASE, overrides)?;
    ensure!(
        tree.lookup(path) == Some(&expected),
        "expected {expected:?} at {path:?}, got {:?}",
        tree.lookup(path)
    );
    Ok(())
}

#[rstest]
fn scalar_over_mapping_replaces_subtree() -> Result<()> {
    let tree = blend_tree(BASE, "service:\n  limits: none\n")?;
    ensure!(
        tree.lookup(&["service", "limits"]) == Some(&Value::from("none")),
        "limits should be replaced wholesale"
    );
    ensure!(
        tree.lookup(&["service", "limits", "cpu"]).is_none(),
        "no partial merge expected"
    );
    Ok(())
}

#[rstest]
fn mapping_over_scalar_replaces_value() -> Result<()> {
    let tree = blend_tree(BASE, "enabled:\n  when: always\n")?;
    ensure!(
        tree.lookup(&["enabled", "when"]) == Some(&Value::from("always")),
        "mapping should replace scalar wholesale"
    );
    Ok(())
}

#[rstest]
fn mapping_over_sequence_replaces_value() -> Result<()> {
    let tree = blend_tree(BASE, "service:\n  ports:\n    http: 80\n")?;
    ensure!(
        tree.lookup(&["service", "ports", "http"]) == Some(&Value::from(80_i64)),
        "mapping should replace sequence wholesale"
    );
    Ok(())
}

#[rstest]
fn blending_a_document_with_itself_is_a_no_op() -> Result<()> {
    let merged = blend(BASE.as_bytes(), BASE.as_bytes())?;
    let reencoded = encode(&decode(BASE)?)?;
    ensure!(merged == reencoded, "self-blend changed the document");
    Ok(())
}

#[rstest]
#[case("")]
#[case("# nothing to override\n")]
#[case("{}\n")]
fn empty_override_re_encodes_base(#[case] overrides: &str) -> Result<()> {
    let merged = blend(BASE.as_bytes(), overrides.as_bytes())?;
    let reencoded = encode(&decode(BASE)?)?;
    ensure!(merged == reencoded, "empty override changed the document");
    Ok(())
}

#[rstest]
fn empty_base_yields_empty_mapping() -> Result<()> {
    let merged = blend(b"", BASE.as_bytes())?;
    ensure!(decode(merged)?.is_empty(), "override keys leaked into empty base");
    Ok(())
}

#[rstest]
#[case("service:\n  replicas: 7\n")]
#[case("logging: off\n")]
fn output_is_round_trip_stable(#[case] overrides: &str) -> Result<()> {
    let first = blend(BASE.as_bytes(), overrides.as_bytes())?;
    let second = encode(&decode(&first)?)?;
    ensure!(
        first == second,
        "re-encoding changed the output:\n{}\n---\n{}",
        String::from_utf8_lossy(&first),
        String::from_utf8_lossy(&second)
    );
    Ok(())
}

#[rstest]
fn string_numbers_stay_strings() -> Result<()> {
    let tree = blend_tree("port: \"6443\"\n", "port: \"6666\"\n")?;
    ensure!(
        tree.lookup(&["port"]) == Some(&Value::from("6666")),
        "quoted number should survive as a string"
    );
    Ok(())
}
