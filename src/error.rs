//! 에러 타입 정의 모듈
//!
//! heic2jpg에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// heic2jpg에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum Heic2JpgError {
    /// 입력 경로가 존재하지 않음
    #[error("입력 경로를 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 일반 파일도 폴더도 아닌 입력
    #[error("지원하지 않는 입력 유형입니다: {path}")]
    UnsupportedInput { path: PathBuf },

    /// HEIC 단일 변환의 출력 경로가 이미 폴더로 존재
    #[error("입력과 출력은 모두 파일이어야 합니다 (출력이 폴더임): {path}")]
    OutputIsDirectory { path: PathBuf },

    /// 출력 확장자가 .jpg가 아님
    #[error("출력 파일 확장자는 .jpg 이어야 합니다: {path}")]
    InvalidOutputExtension { path: PathBuf },

    /// 폴더 생성 실패
    #[error("폴더를 생성할 수 없습니다 ({path}): {reason}")]
    CreateDirectory { path: PathBuf, reason: String },

    /// 폴더 읽기 실패
    #[error("폴더를 읽을 수 없습니다 ({path}): {reason}")]
    ReadDirectory { path: PathBuf, reason: String },

    /// 파일 복사 실패
    #[error("파일 복사 실패 ({from} -> {to}): {reason}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// 하위 폴더 통째 복사 실패
    #[error("폴더 복사 실패 ({from} -> {to}): {reason}")]
    CopyTree {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// 코덱 실행 파일 없음
    #[error("코덱 프로그램을 찾을 수 없습니다: {program}")]
    CodecMissing { program: String },

    /// 코덱 프로세스 실행 실패
    #[error("코덱 실행 실패 ({program}): {reason}")]
    CodecSpawn { program: String, reason: String },

    /// 실패 로그 쓰기 실패
    #[error("로그 파일 쓰기 실패 ({path}): {reason}")]
    LogWrite { path: PathBuf, reason: String },
}

/// heic2jpg 결과 타입 별칭
pub type Result<T> = std::result::Result<T, Heic2JpgError>;
