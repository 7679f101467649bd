use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILE_NAME;

const DEFAULT_CONFIG: &str = r#"# qualitybar configuration

# strict | balanced | lenient
preset = "balanced"

[thresholds]
user_facing_bonus = 5.0
failure_escalation = 5.0
success_rate_floor = 0.85

[thresholds.base]
security = 95
bugfix = 85
feature = 80
refactoring = 80
performance = 85
testing = 85
infrastructure = 85
documentation = 70
exploratory = 65
prototype = 60

[thresholds.phases]
development = 1.0
pre_release = 1.1
maintenance = 1.0
exploration = 0.85

[thresholds.criticality]
critical = 10.0
high = 5.0
medium = 0.0
low = -5.0
trivial = -10.0

[history]
enabled = true
storage_dir = ".qualitybar"
# max_entries = 5000
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
