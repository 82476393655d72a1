/// Constants used throughout the catrust codebase
// Environment variables exported to the agent process
pub const AWS_CA_BUNDLE_VAR: &str = "AWS_CA_BUNDLE";
pub const SSL_CERT_FILE_VAR: &str = "SSL_CERT_FILE";

/// Every variable the resolver may set, in output order
pub const TRUST_ENV_VARS: &[&str] = &[AWS_CA_BUNDLE_VAR, SSL_CERT_FILE_VAR];

// Values document
pub const VALUES_ROOT_KEY: &str = "caCerts";

// Configuration defaults
pub const DEFAULT_SECRET_NAME: &str = "ca-cert-bundle";
pub const DEFAULT_SECRET_KEY: &str = "ca-bundle.crt";
pub const DEFAULT_MOUNT_PATH: &str = "/etc/ssl/certs";
pub const DEFAULT_FILE_NAME: &str = "ca-bundle.crt";

// Pod spec rendering
pub const CA_CERTS_VOLUME_NAME: &str = "ca-certs";
pub const DEFAULT_CONTAINER_NAME: &str = "network-flow-monitor-agent";

// Logging
pub const CATRUST_LOG_VAR: &str = "CATRUST_LOG";
