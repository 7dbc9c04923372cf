use crate::error::SecurityError;

/// Executables permitted by default. Always an explicit allow-list — absence
/// means rejection.
pub const DEFAULT_ALLOWED_COMMANDS: &[&str] = &[
    "npm", "yarn", "git", "node", "npx", "tsc", "eslint", "prettier",
];

/// Command allow-list guard.
///
/// Gates only the leading whitespace-delimited token (the program name).
/// Arguments are passed through uninspected: this is a deliberate, limited
/// defense against invoking off-list programs, not a shell sandbox. An
/// allow-listed program that misbehaves (e.g. `npm` running a malicious
/// postinstall script) is out of scope.
#[derive(Debug, Clone)]
pub struct CommandGuard {
    allowed: Vec<String>,
}

impl Default for CommandGuard {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_COMMANDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        )
    }
}

impl CommandGuard {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Validate a command line: the leading token must be an allow-list
    /// member, compared exactly (case-sensitive).
    pub fn validate(&self, command_line: &str) -> Result<(), SecurityError> {
        let Some(program) = command_line.split_whitespace().next() else {
            return Err(SecurityError::EmptyCommand);
        };

        if self.allowed.iter().any(|allowed| allowed == program) {
            Ok(())
        } else {
            Err(SecurityError::DisallowedCommand {
                program: program.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_accepts_git_status() {
        assert!(CommandGuard::default().validate("git status").is_ok());
    }

    #[test]
    fn default_list_accepts_every_listed_program() {
        let guard = CommandGuard::default();
        for program in DEFAULT_ALLOWED_COMMANDS {
            assert!(
                guard.validate(&format!("{program} --version")).is_ok(),
                "{program} should be allowed"
            );
        }
    }

    #[test]
    fn rejects_rm() {
        let err = CommandGuard::default().validate("rm -rf /").unwrap_err();
        assert!(err.to_string().contains("rm"));
    }

    #[test]
    fn rejects_curl_and_names_it() {
        match CommandGuard::default().validate("curl evil.com") {
            Err(SecurityError::DisallowedCommand { program }) => assert_eq!(program, "curl"),
            other => panic!("expected DisallowedCommand, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        let guard = CommandGuard::default();
        assert!(matches!(guard.validate(""), Err(SecurityError::EmptyCommand)));
        assert!(matches!(
            guard.validate("   \t "),
            Err(SecurityError::EmptyCommand)
        ));
    }

    #[test]
    fn tokenizes_on_runs_of_whitespace() {
        assert!(CommandGuard::default().validate("  git \t log  ").is_ok());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(CommandGuard::default().validate("Git status").is_err());
    }

    #[test]
    fn custom_list_replaces_default() {
        let guard = CommandGuard::new(vec!["cargo".into()]);
        assert!(guard.validate("cargo test").is_ok());
        assert!(guard.validate("git status").is_err());
    }

    #[test]
    fn only_the_program_name_is_gated() {
        // Arguments are not interpreted at this layer.
        assert!(
            CommandGuard::default()
                .validate("git commit -m 'rm -rf /'")
                .is_ok()
        );
    }
}
