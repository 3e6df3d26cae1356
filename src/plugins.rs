// Best-effort plugin installation via `ds plugin install`.
//
// The batch never aborts: each plugin attempt yields a tagged outcome and
// the loop keeps going, so a run with failed plugins still succeeds
// overall. Failures are logged as warnings and collected, not raised.

use crate::runner::CommandRunner;
use crate::{log_info, log_warn};
use colored::Colorize;
use std::path::Path;

/// Result of one plugin install attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOutcome {
    Installed,
    Failed(String),
}

/// Splits the comma-separated plugin input: entries trimmed, blanks dropped,
/// order preserved, duplicates kept (installing a plugin twice is the
/// user's call, not ours).
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Installs every plugin in the input, one `ds plugin install` invocation
/// each, appending `--registry` when an override is given. Returns the
/// per-plugin outcomes in input order.
pub fn install_all(
    raw_list: &str,
    binary: &Path,
    registry: &str,
    runner: &impl CommandRunner,
) -> Vec<(String, PluginOutcome)> {
    let plugins = parse_list(raw_list);
    if plugins.is_empty() {
        return Vec::new();
    }

    let registry = registry.trim();
    log_info!("[Plugins] Installing {} plugin(s)", plugins.len().to_string().bold());

    let mut outcomes = Vec::with_capacity(plugins.len());
    for name in plugins {
        let mut args = vec!["plugin", "install", name.as_str()];
        if !registry.is_empty() {
            args.push("--registry");
            args.push(registry);
        }

        let outcome = match runner.run(binary, &args) {
            Ok(()) => {
                log_info!("[Plugins] Installed {}", name.green());
                PluginOutcome::Installed
            }
            Err(reason) => {
                log_warn!("[Plugins] Failed to install {}: {}", name.yellow(), reason);
                PluginOutcome::Failed(reason)
            }
        };
        outcomes.push((name, outcome));
    }

    let failed = outcomes
        .iter()
        .filter(|(_, o)| matches!(o, PluginOutcome::Failed(_)))
        .count();
    if failed > 0 {
        log_warn!(
            "[Plugins] {} of {} plugin install(s) failed; continuing anyway",
            failed.to_string().yellow(),
            outcomes.len()
        );
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every invocation; fails the ones whose plugin name is listed.
    struct ScriptedRunner {
        fail_on: Vec<&'static str>,
        invocations: RefCell<Vec<Vec<String>>>,
    }

    impl ScriptedRunner {
        fn new(fail_on: Vec<&'static str>) -> Self {
            ScriptedRunner { fail_on, invocations: RefCell::new(Vec::new()) }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, _program: &Path, args: &[&str]) -> Result<(), String> {
            self.invocations
                .borrow_mut()
                .push(args.iter().map(|s| s.to_string()).collect());
            // args are ["plugin", "install", name, ...]
            if self.fail_on.contains(&args[2]) {
                Err(format!("plugin '{}' not found in registry", args[2]))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn parse_trims_drops_blanks_and_keeps_duplicates() {
        assert_eq!(parse_list("a, ,b,a"), vec!["a", "b", "a"]);
        assert_eq!(parse_list(""), Vec::<String>::new());
        assert_eq!(parse_list(" , ,"), Vec::<String>::new());
        assert_eq!(parse_list(" one "), vec!["one"]);
    }

    #[test]
    fn blank_input_is_a_noop() {
        struct PanickingRunner;
        impl CommandRunner for PanickingRunner {
            fn run(&self, _p: &Path, _a: &[&str]) -> Result<(), String> {
                panic!("runner must not be invoked for a blank plugin list");
            }
        }
        assert!(install_all("  ", Path::new("/bin/ds"), "", &PanickingRunner).is_empty());
    }

    #[test]
    fn installs_in_order_with_duplicates_retained() {
        let runner = ScriptedRunner::new(vec![]);
        let outcomes = install_all("a, ,b,a", Path::new("/bin/ds"), "", &runner);

        let names: Vec<&str> = outcomes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(runner.invocations.borrow().len(), 3);
        assert!(outcomes.iter().all(|(_, o)| *o == PluginOutcome::Installed));
    }

    #[test]
    fn mid_batch_failure_does_not_stop_the_loop() {
        let runner = ScriptedRunner::new(vec!["two"]);
        let outcomes = install_all("one,two,three", Path::new("/bin/ds"), "", &runner);

        assert_eq!(runner.invocations.borrow().len(), 3, "all three must be attempted");
        assert_eq!(outcomes[0].1, PluginOutcome::Installed);
        assert!(matches!(outcomes[1].1, PluginOutcome::Failed(_)));
        assert_eq!(outcomes[2].1, PluginOutcome::Installed);
    }

    #[test]
    fn registry_override_is_appended() {
        let runner = ScriptedRunner::new(vec![]);
        install_all("a", Path::new("/bin/ds"), "https://plugins.example.com", &runner);

        let invocations = runner.invocations.borrow();
        assert_eq!(
            invocations[0],
            vec!["plugin", "install", "a", "--registry", "https://plugins.example.com"]
        );
    }

    #[test]
    fn blank_registry_is_omitted() {
        let runner = ScriptedRunner::new(vec![]);
        install_all("a", Path::new("/bin/ds"), "  ", &runner);
        assert_eq!(runner.invocations.borrow()[0], vec!["plugin", "install", "a"]);
    }
}
