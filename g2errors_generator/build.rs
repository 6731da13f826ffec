// build.rs - TOML-driven constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    paths: PathSettings,
    table: TableLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct PathSettings {
    input_file: String,
    go_output_file: String,
    python_output_file: String,
}

#[derive(serde::Deserialize)]
struct TableLimits {
    max_table_file_size: u64,
    max_entries: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=G2ERRORS_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=G2ERRORS_CONFIG_DIR");

    let profile = env::var("G2ERRORS_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("G2ERRORS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the crate directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig) {
    const ABSOLUTE_MAX_TABLE_FILE_SIZE: u64 = 256 * 1024 * 1024;

    for (name, value) in [
        ("paths.input_file", &config.paths.input_file),
        ("paths.go_output_file", &config.paths.go_output_file),
        ("paths.python_output_file", &config.paths.python_output_file),
    ] {
        if value.trim().is_empty() {
            panic!("CONFIG: {} must not be empty", name);
        }
    }

    if config.paths.go_output_file == config.paths.python_output_file {
        panic!("CONFIG: go_output_file and python_output_file must differ");
    }

    if config.table.max_table_file_size == 0
        || config.table.max_table_file_size > ABSOLUTE_MAX_TABLE_FILE_SIZE
    {
        panic!("CONFIG: max_table_file_size out of range");
    }

    if config.table.max_entries == 0 {
        panic!("CONFIG: max_entries must be positive");
    }

    if config.logging.log_buffer_size < 100 || config.logging.log_buffer_size > 100_000 {
        panic!("CONFIG: log_buffer_size out of range (100..=100000)");
    }

    if config.logging.max_log_message_length == 0 {
        panic!("CONFIG: max_log_message_length must be positive");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod paths {{
        pub const INPUT_FILE: &str = {:?};
        pub const GO_OUTPUT_FILE: &str = {:?};
        pub const PYTHON_OUTPUT_FILE: &str = {:?};
    }}

    pub mod table {{
        pub const MAX_TABLE_FILE_SIZE: u64 = {};
        pub const MAX_ENTRIES: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.paths.input_file,
        config.paths.go_output_file,
        config.paths.python_output_file,
        config.table.max_table_file_size,
        config.table.max_entries,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
