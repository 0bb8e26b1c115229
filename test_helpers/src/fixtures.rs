//! Canonical kubeadm hardening template and its secure-port override.
//!
//! The template mixes comments, quoted numbers, plain strings, nested
//! mappings, and sequences of mappings, which makes it a good end-to-end
//! check that untouched structure survives a blend.

/// Base template with kubeadm hardening defaults.
pub const KUBEADM_TEMPLATE: &str = r##"
pack:
  k8sHardening: True
  podCIDR: "192.168.0.0/16"
  serviceClusterIpRange: "10.96.0.0/12"

# KubeAdm customization for kubernetes hardening. Below config will be ignored if k8sHardening property above is disabled
kubeadmconfig:
  apiServer:
    extraArgs:
      # Note : secure-port flag is used during kubeadm init. Do not change this flag on a running cluster
      secure-port: "6443"
      anonymous-auth: "true"
      insecure-port: "0"
      profiling: "false"
      disable-admission-plugins: "AlwaysAdmit"
      default-not-ready-toleration-seconds: "60"
      default-unreachable-toleration-seconds: "60"
      enable-admission-plugins: "AlwaysPullImages,NamespaceLifecycle,ServiceAccount,NodeRestriction,PodSecurityPolicy"
      audit-log-path: /var/log/apiserver/audit.log
      audit-policy-file: /etc/kubernetes/audit-policy.yaml
      audit-log-maxage: "30"
      audit-log-maxbackup: "10"
      audit-log-maxsize: "100"
      authorization-mode: RBAC,Node
      tls-cipher-suites: "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_128_GCM_SHA256"
    extraVolumes:
      - name: audit-log
        hostPath: /var/log/apiserver
        mountPath: /var/log/apiserver
        pathType: DirectoryOrCreate
      - name: audit-policy
        hostPath: /etc/kubernetes/audit-policy.yaml
        mountPath: /etc/kubernetes/audit-policy.yaml
        readOnly: true
        pathType: File
  controllerManager:
    extraArgs:
      profiling: "false"
      terminated-pod-gc-threshold: "25"
      pod-eviction-timeout: "1m0s"
      use-service-account-credentials: "true"
      feature-gates: "RotateKubeletServerCertificate=true"
  scheduler:
    extraArgs:
      profiling: "false"
  kubeletExtraArgs:
    read-only-port : "0"
    event-qps: "0"
    feature-gates: "RotateKubeletServerCertificate=true"
    protect-kernel-defaults: "true"
    tls-cipher-suites: "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_128_GCM_SHA256"
  files:
    - path: hardening/audit-policy.yaml
      targetPath: /etc/kubernetes/audit-policy.yaml
      targetOwner: "root:root"
      targetPermissions: "0600"
    - path: hardening/privileged-psp.yaml
      targetPath: /etc/kubernetes/hardening/privileged-psp.yaml
      targetOwner: "root:root"
      targetPermissions: "0600"
    - path: hardening/90-kubelet.conf
      targetPath: /etc/sysctl.d/90-kubelet.conf
      targetOwner: "root:root"
      targetPermissions: "0600"
  preKubeadmCommands:
    # For enabling 'protect-kernel-defaults' flag to kubelet, kernel parameters changes are required
    - 'echo "====> Applying kernel parameters for Kubelet"'
    - 'sysctl -p /etc/sysctl.d/90-kubelet.conf'
  postKubeadmCommands:
    # Apply the privileged PodSecurityPolicy on the first master node ; Otherwise, CNI (and other) pods won't come up
    - 'export KUBECONFIG=/etc/kubernetes/admin.conf'
    # Sometimes api server takes a little longer to respond. Retry if applying the pod-security-policy manifest fails
    - '[ -f "$KUBECONFIG" ] && { echo " ====> Applying PodSecurityPolicy" ; until $(kubectl apply -f /etc/kubernetes/hardening/privileged-psp.yaml > /dev/null ); do echo "Failed to apply PodSecurityPolicies, will retry in 5s" ; sleep 5 ; done ; } || echo "Skipping PodSecurityPolicy for worker nodes"'
"##;

/// Override that changes only the API server's secure port.
pub const SECURE_PORT_OVERRIDE: &str = r##"
kubeadmconfig:
  apiServer:
    extraArgs:
      secure-port: "6666"
"##;

/// Expected result of blending [`SECURE_PORT_OVERRIDE`] onto
/// [`KUBEADM_TEMPLATE`].
///
/// Compare it structurally: quoting and line folding differ between encoders.
pub const SECURE_PORT_BLENDED: &str = r##"
pack:
  k8sHardening: True
  podCIDR: 192.168.0.0/16
  serviceClusterIpRange: 10.96.0.0/12
kubeadmconfig:
  apiServer:
    extraArgs:
      secure-port: "6666"
      anonymous-auth: "true"
      insecure-port: "0"
      profiling: "false"
      disable-admission-plugins: AlwaysAdmit
      default-not-ready-toleration-seconds: "60"
      default-unreachable-toleration-seconds: "60"
      enable-admission-plugins: AlwaysPullImages,NamespaceLifecycle,ServiceAccount,NodeRestriction,PodSecurityPolicy
      audit-log-path: /var/log/apiserver/audit.log
      audit-policy-file: /etc/kubernetes/audit-policy.yaml
      audit-log-maxage: "30"
      audit-log-maxbackup: "10"
      audit-log-maxsize: "100"
      authorization-mode: RBAC,Node
      tls-cipher-suites: TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_128_GCM_SHA256
    extraVolumes:
    - name: audit-log
      hostPath: /var/log/apiserver
      mountPath: /var/log/apiserver
      pathType: DirectoryOrCreate
    - name: audit-policy
      hostPath: /etc/kubernetes/audit-policy.yaml
      mountPath: /etc/kubernetes/audit-policy.yaml
      readOnly: true
      pathType: File
  controllerManager:
    extraArgs:
      profiling: "false"
      terminated-pod-gc-threshold: "25"
      pod-eviction-timeout: 1m0s
      use-service-account-credentials: "true"
      feature-gates: RotateKubeletServerCertificate=true
  scheduler:
    extraArgs:
      profiling: "false"
  kubeletExtraArgs:
    read-only-port: "0"
    event-qps: "0"
    feature-gates: RotateKubeletServerCertificate=true
    protect-kernel-defaults: "true"
    tls-cipher-suites: TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_128_GCM_SHA256
  files:
  - path: hardening/audit-policy.yaml
    targetPath: /etc/kubernetes/audit-policy.yaml
    targetOwner: root:root
    targetPermissions: "0600"
  - path: hardening/privileged-psp.yaml
    targetPath: /etc/kubernetes/hardening/privileged-psp.yaml
    targetOwner: root:root
    targetPermissions: "0600"
  - path: hardening/90-kubelet.conf
    targetPath: /etc/sysctl.d/90-kubelet.conf
    targetOwner: root:root
    targetPermissions: "0600"
  preKubeadmCommands:
  - echo "====> Applying kernel parameters for Kubelet"
  - sysctl -p /etc/sysctl.d/90-kubelet.conf
  postKubeadmCommands:
  - export KUBECONFIG=/etc/kubernetes/admin.conf
  - '[ -f "$KUBECONFIG" ] && { echo " ====> Applying PodSecurityPolicy" ; until $(kubectl
    apply -f /etc/kubernetes/hardening/privileged-psp.yaml > /dev/null ); do echo
    "Failed to apply PodSecurityPolicies, will retry in 5s" ; sleep 5 ; done ; } ||
    echo "Skipping PodSecurityPolicy for worker nodes"'

"##;

/// Exact bytes the default codec writes for the blend of
/// [`SECURE_PORT_OVERRIDE`] onto [`KUBEADM_TEMPLATE`].
///
/// Comments are dropped, sequences align with their parent key, and only
/// strings that would otherwise read back as another type, or that cannot be
/// written plain, are quoted.
pub const SECURE_PORT_ENCODED: &str = r##"pack:
  k8sHardening: true
  podCIDR: 192.168.0.0/16
  serviceClusterIpRange: 10.96.0.0/12
kubeadmconfig:
  apiServer:
    extraArgs:
      secure-port: "6666"
      anonymous-auth: "true"
      insecure-port: "0"
      profiling: "false"
      disable-admission-plugins: AlwaysAdmit
      default-not-ready-toleration-seconds: "60"
      default-unreachable-toleration-seconds: "60"
      enable-admission-plugins: AlwaysPullImages,NamespaceLifecycle,ServiceAccount,NodeRestriction,PodSecurityPolicy
      audit-log-path: /var/log/apiserver/audit.log
      audit-policy-file: /etc/kubernetes/audit-policy.yaml
      audit-log-maxage: "30"
      audit-log-maxbackup: "10"
      audit-log-maxsize: "100"
      authorization-mode: RBAC,Node
      tls-cipher-suites: TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_128_GCM_SHA256
    extraVolumes:
    - name: audit-log
      hostPath: /var/log/apiserver
      mountPath: /var/log/apiserver
      pathType: DirectoryOrCreate
    - name: audit-policy
      hostPath: /etc/kubernetes/audit-policy.yaml
      mountPath: /etc/kubernetes/audit-policy.yaml
      readOnly: true
      pathType: File
  controllerManager:
    extraArgs:
      profiling: "false"
      terminated-pod-gc-threshold: "25"
      pod-eviction-timeout: 1m0s
      use-service-account-credentials: "true"
      feature-gates: RotateKubeletServerCertificate=true
  scheduler:
    extraArgs:
      profiling: "false"
  kubeletExtraArgs:
    read-only-port: "0"
    event-qps: "0"
    feature-gates: RotateKubeletServerCertificate=true
    protect-kernel-defaults: "true"
    tls-cipher-suites: TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_128_GCM_SHA256
  files:
  - path: hardening/audit-policy.yaml
    targetPath: /etc/kubernetes/audit-policy.yaml
    targetOwner: root:root
    targetPermissions: "0600"
  - path: hardening/privileged-psp.yaml
    targetPath: /etc/kubernetes/hardening/privileged-psp.yaml
    targetOwner: root:root
    targetPermissions: "0600"
  - path: hardening/90-kubelet.conf
    targetPath: /etc/sysctl.d/90-kubelet.conf
    targetOwner: root:root
    targetPermissions: "0600"
  preKubeadmCommands:
  - echo "====> Applying kernel parameters for Kubelet"
  - sysctl -p /etc/sysctl.d/90-kubelet.conf
  postKubeadmCommands:
  - export KUBECONFIG=/etc/kubernetes/admin.conf
  - '[ -f "$KUBECONFIG" ] && { echo " ====> Applying PodSecurityPolicy" ; until $(kubectl apply -f /etc/kubernetes/hardening/privileged-psp.yaml > /dev/null ); do echo "Failed to apply PodSecurityPolicies, will retry in 5s" ; sleep 5 ; done ; } || echo "Skipping PodSecurityPolicy for worker nodes"'
"##;

/// Override exercising keys the template does not declare.
pub const UNKNOWN_KEYS_OVERRIDE: &str = r##"
pack:
  newSetting: enabled
kubeadmconfig:
  etcd:
    local:
      dataDir: /var/lib/etcd
unrelated: true
"##;
