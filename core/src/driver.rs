use crate::analyzer::{CompileError, CompileErrorKind, Verifier};
use crate::source::SourceFile;
use log::info;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// 驱动层配置
#[derive(Debug, Clone)]
pub struct VerifierOptions {
    /// 可接受的源文件扩展名 (不含点)
    pub extension: String,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            extension: "sjava".to_string(),
        }
    }
}

/// 进入校验之前的失败：参数、扩展名、读文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    ArgumentCount(usize),
    FileType { expected: String },
    Unreadable { path: PathBuf, reason: String },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::ArgumentCount(_) => write!(f, "Invalid number of arguments"),
            DriverError::FileType { expected } => {
                write!(f, "Invalid file type: Expected a .{} file", expected)
            }
            DriverError::Unreadable { path, reason } => {
                write!(f, "Could not read file {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for DriverError {}

/// 一次运行的结果，对应三个退出码
#[derive(Debug)]
pub enum Outcome {
    Legal,
    Illegal {
        error: CompileError,
        /// 带源码摘录的诊断
        diagnostic: String,
    },
    Io(DriverError),
}

impl Outcome {
    pub fn code(&self) -> i32 {
        match self {
            Outcome::Legal => 0,
            Outcome::Illegal { .. } => 1,
            Outcome::Io(_) => 2,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Legal => "Compilation successful".to_string(),
            Outcome::Illegal { error, .. } => error.to_string(),
            Outcome::Io(e) => e.to_string(),
        }
    }

    /// 写到 stderr 的内容；合法时没有
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Outcome::Legal => None,
            Outcome::Illegal { diagnostic, .. } => Some(diagnostic.clone()),
            Outcome::Io(e) => Some(e.to_string()),
        }
    }

    pub fn to_report(&self) -> Report {
        let (line, kind) = match self {
            Outcome::Illegal { error, .. } => (error.line, Some(error.kind)),
            _ => (None, None),
        };
        Report {
            code: self.code(),
            message: self.message(),
            line,
            kind,
        }
    }
}

/// `--json` 输出
#[derive(Debug, Serialize)]
pub struct Report {
    pub code: i32,
    pub message: String,
    pub line: Option<usize>,
    pub kind: Option<CompileErrorKind>,
}

#[derive(Debug, Default)]
pub struct Driver {
    pub options: VerifierOptions,
}

impl Driver {
    pub fn new(options: VerifierOptions) -> Self {
        Self { options }
    }

    /// 命令行入口：必须恰好一个源文件
    pub fn run_args(&self, sources: &[PathBuf]) -> Outcome {
        match sources {
            [path] => self.run_file(path),
            _ => Outcome::Io(DriverError::ArgumentCount(sources.len())),
        }
    }

    /// 检查扩展名、读取文件并校验
    pub fn run_file(&self, path: &Path) -> Outcome {
        let extension_ok = path
            .extension()
            .is_some_and(|ext| ext == self.options.extension.as_str());
        if !extension_ok {
            return Outcome::Io(DriverError::FileType {
                expected: self.options.extension.clone(),
            });
        }

        let file = match SourceFile::load(path) {
            Ok(file) => file,
            Err(e) => {
                return Outcome::Io(DriverError::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        let outcome = self.verify_source(&file);
        info!("{}: {}", file.name, outcome.message());
        outcome
    }

    /// 校验已经读入内存的源文件
    pub fn verify_source(&self, file: &SourceFile) -> Outcome {
        match Verifier::new(file).verify() {
            Ok(()) => Outcome::Legal,
            Err(error) => Outcome::Illegal {
                diagnostic: Self::format_diagnostic(file, &error),
                error,
            },
        }
    }

    /// 类似 rustc 的诊断；没有行号时只有消息本身
    /// In line 6: Invalid parameter list in function call
    ///   --> main.sjava:6
    ///    |
    ///   6|     f("a");
    pub fn format_diagnostic(file: &SourceFile, error: &CompileError) -> String {
        let message = error.to_string();
        let Some(line) = error.line else {
            return message;
        };

        match file.line_text(line) {
            Some(text) => format!(
                "{}\n  --> {}:{}\n   |\n{:3}| {}",
                message, file.name, line, line, text
            ),
            None => format!("{}\n  --> {}:{}", message, file.name, line),
        }
    }
}
