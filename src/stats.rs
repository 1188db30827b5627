//! 통계 및 유틸리티 모듈
//!
//! 변환 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{Heic2JpgError, Result};

/// 코덱 변환 실패 기록
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecFailure {
    /// 원본 HEIC 파일
    pub input: PathBuf,
    /// 만들려던 JPG 파일
    pub output: PathBuf,
    /// 코덱 종료 코드
    pub code: Option<i32>,
    /// 코덱 stderr 출력
    pub stderr: String,
}

/// 변환 통계 구조체
#[derive(Debug)]
pub struct Statistics {
    /// JPG로 변환된 파일 수
    pub converted: usize,
    /// 코덱 실패 수
    pub codec_failed: usize,
    /// 그대로 복사된 파일 수
    pub copied: usize,
    /// 입력과 출력이 같아 건너뛴 파일 수
    pub unchanged: usize,
    /// 통째로 복사된 하위 폴더 수
    pub trees_copied: usize,
    /// 처리한 폴더 수
    pub directories: usize,
    /// 복사한 총 바이트
    pub bytes_copied: u64,
    /// 코덱 실패 목록
    pub failures: Vec<CodecFailure>,
    start_time: Instant,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics {
    /// 새 통계 인스턴스 생성 (시작 시간 기록)
    pub fn new() -> Self {
        Self {
            converted: 0,
            codec_failed: 0,
            copied: 0,
            unchanged: 0,
            trees_copied: 0,
            directories: 0,
            bytes_copied: 0,
            failures: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn record_failure(&mut self, failure: CodecFailure) {
        self.codec_failed += 1;
        self.failures.push(failure);
    }

    pub fn add_bytes_copied(&mut self, bytes: u64) {
        self.bytes_copied += bytes;
    }

    /// 실패 없이 끝났는지 여부
    pub fn is_clean(&self) -> bool {
        self.codec_failed == 0
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 처리 통계 요약 출력
    pub fn print_summary(&self) {
        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 변환 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 변환:         {}",
            "🖼️".bright_cyan(),
            self.converted.to_string().green()
        );

        if self.codec_failed > 0 {
            println!(
                "  {} 변환 실패:    {}",
                "❌".bright_red(),
                self.codec_failed.to_string().red()
            );
        } else {
            println!("  {} 변환 실패:    {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 파일 복사:    {}",
            "📄".bright_yellow(),
            self.copied
        );
        if self.unchanged > 0 {
            println!(
                "  {} 제자리 유지:  {}",
                "📌".bright_white(),
                self.unchanged
            );
        }
        println!(
            "  {} 폴더 복사:    {}",
            "📁".bright_magenta(),
            self.trees_copied
        );
        println!(
            "  {} 처리 폴더:    {}",
            "📂".bright_cyan(),
            self.directories
        );
        println!(
            "  {} 복사 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_copied)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 실패 로그 파일 작성 (한 줄에 하나의 JSON 객체)
pub fn write_failure_log(log_path: &Path, failures: &[CodecFailure]) -> Result<()> {
    let log_error = |reason: String| Heic2JpgError::LogWrite {
        path: log_path.to_path_buf(),
        reason,
    };

    let file = File::create(log_path).map_err(|e| log_error(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    for failure in failures {
        serde_json::to_writer(&mut writer, failure).map_err(|e| log_error(e.to_string()))?;
        writeln!(writer).map_err(|e| log_error(e.to_string()))?;
    }

    writer.flush().map_err(|e| log_error(e.to_string()))
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use heic2jpg::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}시간 {}분", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}분 {}초", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
