//! 트리 변환 모듈
//!
//! 입력 경로 하나를 받아 HEIC/HEIF 파일은 JPG로 변환하고, 나머지 파일과 폴더는
//! 출력 트리에 그대로 복제합니다. 재귀 호출 대신 명시적인 작업 스택으로 순회합니다.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{Codec, CodecOutcome};
use crate::error::{Heic2JpgError, Result};
use crate::fsops::{
    copy_file_with_metadata, copy_tree, create_directory, is_heic, is_jpg, jpg_sibling, same_file,
};
use crate::stats::{CodecFailure, Statistics};

/// 기본 JPG 품질
pub const DEFAULT_QUALITY: u8 = 90;

/// 변환 옵션
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// JPG 품질 (0~100)
    pub quality: u8,
    /// 하위 폴더도 변환할지 여부 (false면 통째로 복사)
    pub recursive: bool,
    /// 상세 출력 여부
    pub verbose: bool,
    /// 실제 변환/복사 없이 순회만 수행
    pub dry_run: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            recursive: false,
            verbose: false,
            dry_run: false,
        }
    }

    /// 품질 설정
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// 재귀 처리 설정
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 상세 출력 설정
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 드라이런 설정
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// 순회 중 발생하는 이벤트 (각 작업이 끝난 뒤 전달)
#[derive(Debug)]
pub enum ConvertEvent<'a> {
    /// HEIC/HEIF 파일 변환
    Converted {
        input: &'a Path,
        output: &'a Path,
        outcome: &'a CodecOutcome,
    },
    /// 일반 파일 복사
    Copied {
        input: &'a Path,
        output: &'a Path,
        bytes: u64,
    },
    /// 입력과 출력이 같아 그대로 둔 파일 또는 폴더
    Unchanged { path: &'a Path },
    /// 재귀하지 않는 하위 폴더 통째 복사
    TreeCopied {
        input: &'a Path,
        output: &'a Path,
        bytes: u64,
    },
    /// 폴더의 모든 항목 처리 완료
    DirectoryDone { input: &'a Path, output: &'a Path },
}

/// 작업 스택 항목
#[derive(Debug)]
enum Task {
    Visit {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    CopyTree {
        input: PathBuf,
        output: PathBuf,
    },
    FinishDirectory {
        input: PathBuf,
        output: PathBuf,
    },
}

/// 트리 변환기
#[derive(Debug, Clone, Default)]
pub struct TreeConverter {
    options: ConvertOptions,
    codec: Codec,
}

impl TreeConverter {
    /// 새 변환기 생성
    pub fn new(options: ConvertOptions, codec: Codec) -> Self {
        Self { options, codec }
    }

    /// 변환 옵션 반환
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// 입력 경로 변환 실행
    ///
    /// # Arguments
    /// * `input` - 입력 파일 또는 폴더
    /// * `output` - 출력 파일 또는 폴더 (None이면 입력 위치 기준으로 결정)
    /// * `on_event` - 작업마다 호출되는 콜백
    ///
    /// # Returns
    /// 순회가 끝까지 진행되면 `Statistics`. 코덱 실패는 통계에 기록되고 순회는 계속되며,
    /// 그 외 에러는 그 시점에서 순회를 중단합니다.
    pub fn run<F>(
        &self,
        input: &Path,
        output: Option<&Path>,
        mut on_event: F,
    ) -> Result<Statistics>
    where
        F: FnMut(&ConvertEvent<'_>),
    {
        let mut stats = Statistics::new();
        let mut frontier = vec![Task::Visit {
            input: input.to_path_buf(),
            output: output.map(Path::to_path_buf),
        }];
        // 출력 폴더가 입력 안에 있으면 자기 자신을 다시 순회하지 않도록 제외
        let mut output_root: Option<PathBuf> = None;

        while let Some(task) = frontier.pop() {
            match task {
                Task::Visit { input, output } => {
                    if input.is_file() {
                        self.visit_file(&input, output, &mut stats, &mut on_event)?;
                    } else if input.is_dir() {
                        let output = self.prepare_directory_output(&input, output)?;
                        if output_root.is_none() && output != input {
                            output_root = fs::canonicalize(&output).ok();
                        }
                        let root = output_root.as_deref();
                        self.visit_directory(input, output, root, &mut frontier)?;
                    } else if input.exists() {
                        return Err(Heic2JpgError::UnsupportedInput { path: input });
                    } else {
                        return Err(Heic2JpgError::InputNotFound { path: input });
                    }
                }
                Task::CopyTree { input, output } => {
                    let root = output_root.as_deref();
                    self.copy_subtree(&input, &output, root, &mut stats, &mut on_event)?;
                }
                Task::FinishDirectory { input, output } => {
                    stats.directories += 1;
                    on_event(&ConvertEvent::DirectoryDone {
                        input: &input,
                        output: &output,
                    });
                }
            }
        }

        Ok(stats)
    }

    fn visit_file<F>(
        &self,
        input: &Path,
        output: Option<PathBuf>,
        stats: &mut Statistics,
        on_event: &mut F,
    ) -> Result<()>
    where
        F: FnMut(&ConvertEvent<'_>),
    {
        if is_heic(input) {
            let output = self.resolve_jpg_output(input, output)?;
            let outcome = if self.options.dry_run {
                CodecOutcome::Planned
            } else {
                self.codec.encode(input, &output, self.options.quality)?
            };

            match &outcome {
                CodecOutcome::Success | CodecOutcome::Planned => stats.converted += 1,
                CodecOutcome::Failed { code, stderr } => stats.record_failure(CodecFailure {
                    input: input.to_path_buf(),
                    output: output.clone(),
                    code: *code,
                    stderr: stderr.clone(),
                }),
                CodecOutcome::Missing => {
                    return Err(Heic2JpgError::CodecMissing {
                        program: self.codec.program(),
                    })
                }
            }

            on_event(&ConvertEvent::Converted {
                input,
                output: &output,
                outcome: &outcome,
            });
            return Ok(());
        }

        // 기존 폴더가 출력이면 그 안에 같은 이름으로 복사
        let output = match output {
            Some(dir) if dir.is_dir() => match input.file_name() {
                Some(name) => dir.join(name),
                None => dir,
            },
            Some(output) => output,
            None => input.to_path_buf(),
        };
        if same_file(input, &output) {
            stats.unchanged += 1;
            on_event(&ConvertEvent::Unchanged { path: input });
            return Ok(());
        }

        let copy_error = |e: std::io::Error| Heic2JpgError::CopyFile {
            from: input.to_path_buf(),
            to: output.clone(),
            reason: e.to_string(),
        };
        let bytes = if self.options.dry_run {
            fs::metadata(input).map(|m| m.len()).map_err(copy_error)?
        } else {
            copy_file_with_metadata(input, &output).map_err(copy_error)?
        };

        stats.copied += 1;
        stats.add_bytes_copied(bytes);
        on_event(&ConvertEvent::Copied {
            input,
            output: &output,
            bytes,
        });
        Ok(())
    }

    /// HEIC 변환의 출력 경로 결정 및 검증
    fn resolve_jpg_output(&self, input: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
        let Some(output) = output else {
            return Ok(jpg_sibling(input));
        };

        if output.is_dir() {
            return Err(Heic2JpgError::OutputIsDirectory { path: output });
        }
        if !is_jpg(&output) {
            return Err(Heic2JpgError::InvalidOutputExtension { path: output });
        }

        // 부모가 빈 경로면 현재 폴더
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.options.dry_run {
                create_directory(parent)?;
            }
        }

        Ok(output)
    }

    fn prepare_directory_output(&self, input: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
        match output {
            Some(output) => {
                if !self.options.dry_run {
                    create_directory(&output)?;
                }
                Ok(output)
            }
            None => Ok(input.to_path_buf()),
        }
    }

    /// 폴더 항목을 작업 스택에 추가
    ///
    /// 항목 순서는 이름순이며, 완료 표시는 모든 항목 뒤에 처리됩니다.
    fn visit_directory(
        &self,
        input: PathBuf,
        output: PathBuf,
        output_root: Option<&Path>,
        frontier: &mut Vec<Task>,
    ) -> Result<()> {
        let read_error = |e: std::io::Error| Heic2JpgError::ReadDirectory {
            path: input.clone(),
            reason: e.to_string(),
        };

        let mut names: Vec<OsString> = fs::read_dir(&input)
            .map_err(read_error)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<std::io::Result<_>>()
            .map_err(read_error)?;
        names.sort();

        let mut children = Vec::with_capacity(names.len());
        for name in names {
            let child_input = input.join(&name);
            let child_output = output.join(&name);

            if child_input.is_file() {
                let child_output = if is_heic(&child_input) {
                    jpg_sibling(&child_output)
                } else {
                    child_output
                };
                children.push(Task::Visit {
                    input: child_input,
                    output: Some(child_output),
                });
            } else if child_input.is_dir() {
                if output_root.is_some_and(|root| same_file(&child_input, root)) {
                    continue;
                }
                if self.options.recursive {
                    children.push(Task::Visit {
                        input: child_input,
                        output: Some(child_output),
                    });
                } else {
                    children.push(Task::CopyTree {
                        input: child_input,
                        output: child_output,
                    });
                }
            }
        }

        frontier.push(Task::FinishDirectory { input, output });
        frontier.extend(children.into_iter().rev());
        Ok(())
    }

    fn copy_subtree<F>(
        &self,
        input: &Path,
        output: &Path,
        output_root: Option<&Path>,
        stats: &mut Statistics,
        on_event: &mut F,
    ) -> Result<()>
    where
        F: FnMut(&ConvertEvent<'_>),
    {
        if same_file(input, output) {
            stats.unchanged += 1;
            on_event(&ConvertEvent::Unchanged { path: input });
            return Ok(());
        }

        let bytes = if self.options.dry_run {
            0
        } else {
            copy_tree(input, output, output_root)?
        };

        stats.trees_copied += 1;
        stats.add_bytes_copied(bytes);
        on_event(&ConvertEvent::TreeCopied {
            input,
            output,
            bytes,
        });
        Ok(())
    }
}
