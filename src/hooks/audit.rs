use super::HookContext;
use crate::console;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditVerdict {
    Clean,
    LowOnly,
    Vulnerable,
}

/// Best-effort reading of `npm audit` text output after a non-zero exit.
/// Only an explicit "low severity" with no mention of a worse level is
/// treated as acceptable; anything unrecognised counts as vulnerable.
pub fn classify(stdout: &str) -> AuditVerdict {
    let text = stdout.to_lowercase();
    let worse = ["moderate", "high", "critical"]
        .iter()
        .any(|level| text.contains(level));
    if text.contains("low severity") && !worse {
        AuditVerdict::LowOnly
    } else {
        AuditVerdict::Vulnerable
    }
}

/// Dependency audit. Missing manifest or dependencies are warnings, not failures.
pub fn run(ctx: &HookContext) -> Result<bool> {
    console::info("Running dependency audit...");
    let toolchain = &ctx.config.toolchain;

    if !ctx
        .executor
        .run(&format!("test -f {}", toolchain.manifest))
        .success
    {
        console::warn(&format!("No {} found. Skipping audit.", toolchain.manifest));
        return Ok(true);
    }

    if !ctx.has_deps_dir() {
        console::warn(&format!("No {} found. Run npm install first.", toolchain.deps_dir));
        return Ok(true);
    }

    let result = ctx.run_with_timeout(&toolchain.audit, ctx.config.command_timeout);
    let verdict = if result.success {
        AuditVerdict::Clean
    } else {
        console::warn("Dependency audit: vulnerabilities found");
        println!("{}", result.stdout);
        classify(&result.stdout)
    };

    match verdict {
        AuditVerdict::Clean => {
            console::success("Dependency audit: no moderate or high severity vulnerabilities found");
            Ok(true)
        }
        AuditVerdict::LowOnly => {
            console::warn("Only low severity vulnerabilities found. Consider running: npm audit fix");
            Ok(true)
        }
        AuditVerdict::Vulnerable => {
            console::error(
                "Moderate or higher severity vulnerabilities found. Review and fix with: npm audit fix",
            );
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::testing;

    #[test]
    fn classification() {
        assert_eq!(classify("3 low severity vulnerabilities"), AuditVerdict::LowOnly);
        assert_eq!(classify("3 Low Severity vulnerabilities"), AuditVerdict::LowOnly);
        assert_eq!(
            classify("2 low severity, 1 High severity vulnerability"),
            AuditVerdict::Vulnerable
        );
        assert_eq!(classify("1 low severity, 1 CRITICAL"), AuditVerdict::Vulnerable);
        assert_eq!(classify(""), AuditVerdict::Vulnerable);
    }

    #[test]
    fn missing_manifest_or_deps_is_not_a_failure() {
        let (dir, ctx) = testing::context("");
        assert!(run(&ctx).unwrap());

        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        assert!(run(&ctx).unwrap());
    }

    #[test]
    fn audit_exit_code_and_severity_decide() {
        let (dir, mut ctx) = testing::context("");
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();

        ctx.config.toolchain.audit = "echo 'found 0 vulnerabilities'".to_string();
        assert!(run(&ctx).unwrap());

        ctx.config.toolchain.audit = "echo '1 low severity vulnerability'; exit 1".to_string();
        assert!(run(&ctx).unwrap());

        ctx.config.toolchain.audit = "echo '1 critical severity vulnerability'; exit 1".to_string();
        assert!(!run(&ctx).unwrap());
    }
}
