use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Codec failure while resolving, decoding, or casting.
	#[error(transparent)]
	Codec(#[from] omlit::codec::CodecError),
	/// Input file could not be read.
	#[error("cannot read {}: {source}", path.display())]
	Read {
		/// File that failed to open.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Schema file or host value is not valid JSON.
	#[error("invalid JSON in {context}: {source}")]
	InvalidJson {
		/// What was being parsed.
		context: String,
		/// Underlying parse failure.
		#[source]
		source: serde_json::Error,
	},
	/// JSON output could not be rendered.
	#[error("cannot render JSON output: {0}")]
	Render(#[from] serde_json::Error),
	/// Neither literal text nor an input file was given.
	#[error("no literal text given; pass TEXT or --file")]
	MissingInput,
	/// Value path does not reach into the decoded value.
	#[error("value path {path} selects nothing")]
	EmptySelection {
		/// Rendered value path.
		path: String,
	},
}
