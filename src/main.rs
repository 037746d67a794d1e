use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use sjava::{Driver, Outcome};
use std::path::PathBuf;

/// 校验 .sjava 源文件是否合法
#[derive(Parser, Debug)]
#[command(name = "sjavac", version)]
struct Cli {
    /// 源文件，必须恰好一个
    #[arg(value_name = "FILE")]
    sources: Vec<PathBuf>,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,
}

fn main() {
    // 日志走 stderr，stdout 只留给结果
    if let Err(e) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("failed to initialize logger: {}", e);
    }

    let cli = Cli::parse();
    let outcome = Driver::default().run_args(&cli.sources);

    if cli.json {
        print_json(&outcome);
    } else {
        let (stdout, stderr) = render_plain(&outcome);
        println!("{}", stdout);
        if let Some(stderr) = stderr {
            eprintln!("{}", stderr);
        }
    }

    std::process::exit(outcome.code());
}

/// 普通输出：stdout 是退出码 (合法时再加成功信息)，stderr 是诊断
fn render_plain(outcome: &Outcome) -> (String, Option<String>) {
    match outcome.diagnostic() {
        Some(diagnostic) => (outcome.code().to_string(), Some(diagnostic)),
        None => (format!("{}\n{}", outcome.code(), outcome.message()), None),
    }
}

fn print_json(outcome: &Outcome) {
    match serde_json::to_string_pretty(&outcome.to_report()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to serialize report: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sjava::DriverError;

    #[test]
    fn legal_input_prints_success_message() {
        let (stdout, stderr) = render_plain(&Outcome::Legal);
        assert_eq!(stdout, "0\nCompilation successful");
        assert_eq!(stderr, None);
    }

    #[test]
    fn failures_print_code_then_diagnostic() {
        let outcome = Outcome::Io(DriverError::ArgumentCount(0));
        let (stdout, stderr) = render_plain(&outcome);
        assert_eq!(stdout, "2");
        assert_eq!(stderr.as_deref(), Some("Invalid number of arguments"));
    }
}
