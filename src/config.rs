use std::path::PathBuf;

/// How replies are written to the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per reply.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingInput,
    BadFormat(String),
    BadPort(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingInput => write!(f, "usage: seatq <input-file>"),
            ConfigError::BadFormat(v) => {
                write!(f, "SEATQ_FORMAT must be \"text\" or \"json\", got {v:?}")
            }
            ConfigError::BadPort(v) => write!(f, "SEATQ_METRICS_PORT is not a port: {v:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub metrics_port: Option<u16>,
}

impl Config {
    /// Build from the process arguments (program name first) and an
    /// environment lookup.
    ///
    /// - argv[1]: input command file
    /// - `SEATQ_OUTPUT`: output path, default `<input>_output_file.txt`
    /// - `SEATQ_FORMAT`: `text` (default) or `json`
    /// - `SEATQ_METRICS_PORT`: Prometheus exporter port, disabled when unset
    pub fn from_env<I, F>(args: I, var: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let input = args.into_iter().nth(1).ok_or(ConfigError::MissingInput)?;
        let output = var("SEATQ_OUTPUT").unwrap_or_else(|| format!("{input}_output_file.txt"));

        let format = match var("SEATQ_FORMAT").as_deref() {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => return Err(ConfigError::BadFormat(other.to_string())),
        };

        let metrics_port = var("SEATQ_METRICS_PORT")
            .map(|s| s.parse::<u16>().map_err(|_| ConfigError::BadPort(s)))
            .transpose()?;

        Ok(Self {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            format,
            metrics_port,
        })
    }
}
