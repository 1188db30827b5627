//! 외부 코덱 호출 모듈
//!
//! HEIC/HEIF를 JPG로 변환하는 외부 프로그램(기본값: libheif의 `heif-convert`)을
//! 셸을 거치지 않고 인자 벡터로 실행하고, 종료 상태를 타입으로 돌려줍니다.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::{Heic2JpgError, Result};

/// 기본 코덱 프로그램
pub const DEFAULT_CODEC: &str = "heif-convert";

/// 코덱 호출 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecOutcome {
    /// 정상 종료
    Success,
    /// 0이 아닌 종료 코드 (시그널로 종료되면 `code`는 None)
    Failed { code: Option<i32>, stderr: String },
    /// 코덱 실행 파일을 찾을 수 없음
    Missing,
    /// 드라이런 모드라 실행하지 않음
    Planned,
}

impl CodecOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CodecOutcome::Success)
    }
}

/// 외부 코덱 설정
#[derive(Debug, Clone)]
pub struct Codec {
    program: OsString,
    args: Vec<OsString>,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(DEFAULT_CODEC)
    }
}

impl Codec {
    /// 새 코덱 설정 생성
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `-q` 앞에 붙일 추가 인자 설정
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// 프로그램 이름 (표시용)
    pub fn program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// 실행할 명령 구성: `program [args..] -q <quality> <src> <dst>`
    fn command(&self, src: &Path, dst: &Path, quality: u8) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("-q")
            .arg(quality.to_string())
            .arg(src)
            .arg(dst);
        cmd
    }

    /// 단일 파일 변환
    ///
    /// 프로세스가 끝날 때까지 블로킹합니다. 실행 파일이 없으면
    /// `CodecOutcome::Missing`을, 그 외 실행 실패는 에러를 반환합니다.
    pub fn encode(&self, src: &Path, dst: &Path, quality: u8) -> Result<CodecOutcome> {
        let output = match self.command(src, dst, quality).output() {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CodecOutcome::Missing),
            Err(e) => {
                return Err(Heic2JpgError::CodecSpawn {
                    program: self.program(),
                    reason: e.to_string(),
                })
            }
        };

        if output.status.success() {
            Ok(CodecOutcome::Success)
        } else {
            Ok(CodecOutcome::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
