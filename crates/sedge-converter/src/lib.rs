//! # sedge-converter
//!
//! Drives Solid Edge Translation Services (`SolidEdgeTranslationServices.exe`)
//! to turn Solid Edge draft files (`.dft`) into images or PDF documents.
//!
//! The crate never touches the draft format itself. It validates paths and
//! file types eagerly, assembles the tool's command line from the options
//! that were set, runs it, and scans the captured output for lines that
//! mention an error.
//!
//! ```no_run
//! # async fn demo() -> Result<(), sedge_converter::ConversionError> {
//! use sedge_converter::{DraftConverter, Quality, Resolution};
//!
//! let mut converter = DraftConverter::new();
//! let ok = converter
//!     .set_tool_path("C:/Program Files/Siemens/Solid Edge 2022/Program/SolidEdgeTranslationServices.exe")?
//!     .from("C:/drafts/bracket.dft")?
//!     .to("C:/exports/bracket.jpg")?
//!     .resolution(Resolution::Dpi300)
//!     .quality(Quality::High)
//!     .convert()
//!     .await?;
//!
//! if !ok {
//!     for line in converter.errors() {
//!         eprintln!("{line}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod command;
pub mod converter;
pub mod discovery;
pub mod error;
pub mod filesystem;
pub mod options;
pub mod process;

pub use classifier::OutputClassifier;
pub use command::CommandLine;
pub use converter::{ConversionReport, DraftConverter};
pub use discovery::{DiscoveryError, DiscoveryMethod, ToolDiscovery, ToolInstallation};
pub use error::ConversionError;
pub use filesystem::FsProbe;
pub use options::{ColorDepth, ConversionOptions, OutputFormat, Quality, Resolution};
pub use process::{ExecutionResult, ProcessError, ProcessRunner, ShellRunner};
