//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::codec::{Codec, DEFAULT_CODEC};
use crate::converter::{ConvertOptions, DEFAULT_QUALITY};

/// heic2jpg CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "heic2jpg",
    author = "YourName <your@email.com>",
    version,
    about = "HEIC TO JPG CONVERTER - HEIC/HEIF 이미지를 JPG로 변환하는 CLI 도구 (libheif heif-convert 사용)",
    long_about = r#"
HEIC TO JPG CONVERTER
=====================

입력 파일 또는 폴더를 받아 HEIC/HEIF 이미지는 JPG로 변환하고,
나머지 파일과 폴더는 출력 위치에 그대로 복사합니다.

특징:
  • 폴더 구조를 그대로 유지하는 출력 트리 생성
  • 하위 폴더 재귀 변환 또는 통째 복사 선택
  • 코덱 실패 파일 목록 및 JSONL 로그
  • 드라이런 모드로 실제 작업 전 확인

예제:
  heic2jpg -d photo.HEIC
  heic2jpg -d ./album -o ./album_jpg --recursive
  heic2jpg -d ./album -o ./album_jpg -q 80 --verbose
  heic2jpg -d ./album --dry-run
"#
)]
pub struct Args {
    /// 입력 파일 또는 폴더
    #[arg(short = 'd', long = "data", visible_alias = "input")]
    pub input: PathBuf,

    /// 출력 파일 또는 폴더 (기본값: 입력과 같은 위치, HEIC는 .jpg 확장자)
    #[arg(short = 'o', long = "out")]
    pub output: Option<PathBuf>,

    /// 입력이 폴더일 때 하위 폴더도 변환 (기본값: 하위 폴더는 그대로 복사)
    #[arg(short, long, visible_alias = "rec")]
    pub recursive: bool,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 변환될 JPG 품질 (0~100)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub quality: u8,

    /// HEIC 변환에 사용할 코덱 프로그램
    #[arg(long, default_value = DEFAULT_CODEC)]
    pub codec: String,

    /// 코덱에 추가로 전달할 인자 (-q 앞에 위치, 여러 번 지정 가능)
    #[arg(long = "codec-arg", allow_hyphen_values = true)]
    pub codec_args: Vec<String>,

    /// 실제 변환/복사 없이 처리될 작업만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 코덱 실패 로그 파일 경로 (JSONL)
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl Args {
    /// 변환 옵션 생성
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_quality(self.quality)
            .with_recursive(self.recursive)
            .with_verbose(self.verbose)
            .with_dry_run(self.dry_run)
    }

    /// 코덱 설정 생성
    pub fn codec(&self) -> Codec {
        Codec::new(&self.codec).with_args(&self.codec_args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["heic2jpg", "-d", "album"]).unwrap();

        assert_eq!(args.input, PathBuf::from("album"));
        assert!(args.output.is_none());
        assert!(!args.recursive);
        assert!(!args.verbose);
        assert_eq!(args.quality, 90);
        assert_eq!(args.codec, "heif-convert");
        assert!(args.codec_args.is_empty());
    }

    #[test]
    fn test_aliases() {
        let args = Args::try_parse_from([
            "heic2jpg", "--input", "album", "--out", "out", "--rec", "-q", "75",
        ])
        .unwrap();

        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert!(args.recursive);
        assert_eq!(args.convert_options().quality, 75);
    }

    #[test]
    fn test_quality_out_of_range() {
        let result = Args::try_parse_from(["heic2jpg", "-d", "a", "-q", "101"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_input_required() {
        assert!(Args::try_parse_from(["heic2jpg"]).is_err());
    }

    #[test]
    fn test_codec_args() {
        let args = Args::try_parse_from([
            "heic2jpg",
            "-d",
            "a",
            "--codec",
            "/opt/bin/heif-convert",
            "--codec-arg",
            "--with-exif",
        ])
        .unwrap();

        assert_eq!(args.codec().program(), "/opt/bin/heif-convert");
        assert_eq!(args.codec_args, vec!["--with-exif".to_string()]);
    }
}
