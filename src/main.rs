//! heic2jpg - HEIC TO JPG CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

use heic2jpg::{
    cli::Args,
    codec::CodecOutcome,
    converter::{ConvertEvent, TreeConverter},
    stats::{format_bytes, format_duration, write_failure_log, CodecFailure},
};

fn main() -> Result<()> {
    let started = Instant::now();
    let args = Args::parse();

    // 헤더 출력
    print_header(&args);

    let converter = TreeConverter::new(args.convert_options(), args.codec());
    let options = converter.options();
    let verbose = options.verbose || options.dry_run;

    // 상세 출력 모드에서는 한 줄씩 출력하고 스피너는 숨김
    let pb = if verbose {
        ProgressBar::hidden()
    } else {
        create_spinner()
    };

    let stats = converter
        .run(&args.input, args.output.as_deref(), |event| {
            if verbose {
                print_event(event);
            } else {
                pb.inc(1);
                if let Some(name) = event_name(event) {
                    pb.set_message(name);
                }
            }
        })
        .with_context(|| format!("변환 중단: {:?}", args.input))?;

    pb.finish_and_clear();

    // 실패 출력
    print_failures(&stats.failures, args.verbose);

    // 로그 파일 작성
    if let Some(ref log_path) = args.log {
        write_failure_log(log_path, &stats.failures)?;
        println!("\n{} 실패 로그 저장: {:?}", "📝".bright_cyan(), log_path);
    }

    // 통계 출력
    stats.print_summary();

    println!(
        "\n{} 프로그램 완료: {}\n",
        "⏱️".bright_cyan(),
        format_duration(started.elapsed())
    );

    if !stats.is_clean() {
        anyhow::bail!("{} 개의 파일을 변환하지 못했습니다", stats.codec_failed);
    }

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🖼️  HEIC TO JPG CONVERTER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력: {:?}", "📂".bright_cyan(), args.input);

    match args.output {
        Some(ref output) => println!("  {} 출력: {:?}", "📄".bright_green(), output),
        None => println!("  {} 출력: {}", "📄".bright_green(), "입력과 같은 위치".dimmed()),
    }

    println!("  {} 품질: {}", "⚙️".bright_yellow(), args.quality);
    println!("  {} 코덱: {}", "🔧".bright_white(), args.codec);

    if args.recursive {
        println!("  {} {}", "🔁".bright_magenta(), "하위 폴더 재귀 변환".magenta());
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환/복사 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 작업 중 표시할 스피너 생성
fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} 항목 처리 {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 스피너 메시지로 쓸 파일 이름
fn event_name(event: &ConvertEvent<'_>) -> Option<String> {
    let path = match event {
        ConvertEvent::Converted { input, .. }
        | ConvertEvent::Copied { input, .. }
        | ConvertEvent::TreeCopied { input, .. }
        | ConvertEvent::DirectoryDone { input, .. } => input,
        ConvertEvent::Unchanged { path } => path,
    };
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// 이벤트 한 줄 출력
fn print_event(event: &ConvertEvent<'_>) {
    match event {
        ConvertEvent::Converted {
            input,
            output,
            outcome,
        } => match outcome {
            CodecOutcome::Failed { code, .. } => println!(
                "  {} 변환 실패 {:?} -> {:?} (종료 코드: {})",
                "✗".red(),
                input,
                output,
                code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
            ),
            _ => println!("  {} 변환 {:?} -> {:?}", "✓".green(), input, output),
        },
        ConvertEvent::Copied {
            input,
            output,
            bytes,
        } => println!(
            "  {} 복사 {:?} -> {:?} ({})",
            "✓".green(),
            input,
            output,
            format_bytes(*bytes)
        ),
        ConvertEvent::Unchanged { path } => {
            println!("  {} 제자리 유지 {:?}", "•".dimmed(), path)
        }
        ConvertEvent::TreeCopied { input, output, .. } => {
            println!("  {} 폴더 복사 {:?} -> {:?}", "✓".green(), input, output)
        }
        ConvertEvent::DirectoryDone { input, output } => println!(
            "{} 폴더 변환 완료 {:?} -> {:?}",
            "📁".bright_cyan(),
            input,
            output
        ),
    }
}

/// 실패 목록 출력
fn print_failures(failures: &[CodecFailure], verbose: bool) {
    if failures.is_empty() {
        return;
    }

    println!("\n{}", "❌ 변환 실패 파일:".bright_red());
    for failure in failures {
        println!("  {} {:?}", "•".red(), failure.input);
        if verbose && !failure.stderr.is_empty() {
            println!("    {}", failure.stderr.dimmed());
        }
    }
}
