//! AliceGlow 콘솔 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 명령행 인자 정의 ([`cli`])
//! - 세션/백엔드 구성 및 화면 접근 검사 ([`console`])
//! - 화면별 명령 구현 ([`commands`])
//! - 표/JSON 출력 ([`output`])

pub mod cli;
pub mod commands;
pub mod console;
pub mod output;

pub use console::{report, CliError, Console};
pub use output::OutputFormat;
