use catrust_config::CaCertsConfig;
use catrust_core::Result;
use catrust_resolver::resolve;
use catrust_shell::ShellType;

pub fn execute(config: &CaCertsConfig, shell: ShellType, unset_absent: bool) -> Result<()> {
    let output = render(config, shell, unset_absent)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Trust variables never depend on the key listing, so none is needed here
fn render(config: &CaCertsConfig, shell: ShellType, unset_absent: bool) -> Result<String> {
    let spec = resolve(config, std::iter::empty::<&str>())?;
    let unset: Vec<&str> = if unset_absent {
        spec.absent_env_vars().collect()
    } else {
        Vec::new()
    };
    Ok(shell.as_shell().render(&spec.env_vars, &unset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key_exports() {
        let config = CaCertsConfig {
            enabled: true,
            mount_path: "/etc/pki/tls/certs/".to_string(),
            ..CaCertsConfig::default()
        };
        assert_eq!(
            render(&config, ShellType::Bash, false).unwrap(),
            "export AWS_CA_BUNDLE=/etc/pki/tls/certs/ca-bundle.crt\n\
             export SSL_CERT_FILE=/etc/pki/tls/certs/ca-bundle.crt"
        );
    }

    #[test]
    fn test_disabled_unsets_when_asked() {
        let config = CaCertsConfig::default();
        assert_eq!(render(&config, ShellType::Fish, false).unwrap(), "");
        assert_eq!(
            render(&config, ShellType::Fish, true).unwrap(),
            "set -e AWS_CA_BUNDLE\nset -e SSL_CERT_FILE"
        );
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = CaCertsConfig {
            enabled: true,
            file_name: String::new(),
            ..CaCertsConfig::default()
        };
        assert!(render(&config, ShellType::Bash, false).is_err());
    }
}
