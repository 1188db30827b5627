//! 파일 시스템 보조 모듈
//!
//! 폴더 생성, 메타데이터를 보존하는 파일 복사, 하위 트리 통째 복사,
//! 확장자 판별을 담당합니다.

use filetime::{set_file_times, FileTime};
use same_file::is_same_file;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Heic2JpgError, Result};

/// 변환 대상 확장자
const HEIC_EXTENSIONS: [&str; 2] = ["heic", "heif"];

/// 출력 확장자
pub const JPG_EXTENSION: &str = "jpg";

/// 폴더가 없으면 생성 (상위 폴더 포함)
///
/// 이미 존재하는 경우는 무시하고, 그 외 실패는 그대로 전달합니다.
pub fn create_directory(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(Heic2JpgError::CreateDirectory {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// 확장자가 대소문자 구분 없이 주어진 목록 중 하나인지 확인
fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// HEIC/HEIF 파일인지 확인 (확장자 기준)
///
/// # Examples
/// ```
/// use heic2jpg::fsops::is_heic;
/// use std::path::Path;
///
/// assert!(is_heic(Path::new("photo.HEIC")));
/// assert!(is_heic(Path::new("photo.heif")));
/// assert!(!is_heic(Path::new("photo.jpg")));
/// ```
pub fn is_heic(path: &Path) -> bool {
    has_extension(path, &HEIC_EXTENSIONS)
}

/// JPG 확장자인지 확인 (.jpeg는 허용하지 않음)
pub fn is_jpg(path: &Path) -> bool {
    has_extension(path, &[JPG_EXTENSION])
}

/// 같은 위치에 확장자만 .jpg로 바꾼 경로
pub fn jpg_sibling(path: &Path) -> PathBuf {
    path.with_extension(JPG_EXTENSION)
}

/// 두 경로가 같은 파일을 가리키는지 확인 (하드 링크 포함)
///
/// 둘 중 하나라도 존재하지 않으면 `false`.
pub fn same_file(a: &Path, b: &Path) -> bool {
    is_same_file(a, b).unwrap_or(false)
}

/// 파일 내용과 메타데이터(권한, 접근/수정 시간) 복사
///
/// 심볼릭 링크는 따라가서 원본 내용을 복사합니다.
///
/// # Returns
/// 복사된 바이트 수
pub fn copy_file_with_metadata(src: &Path, dst: &Path) -> io::Result<u64> {
    let bytes = fs::copy(src, dst)?;
    let meta = fs::metadata(src)?;
    fs::set_permissions(dst, meta.permissions())?;
    copy_times(&meta, dst)?;
    Ok(bytes)
}

fn copy_times(meta: &fs::Metadata, dst: &Path) -> io::Result<()> {
    let atime = FileTime::from_last_access_time(meta);
    let mtime = FileTime::from_last_modification_time(meta);
    set_file_times(dst, atime, mtime)
}

/// 폴더 트리 통째 복사
///
/// - 심볼릭 링크는 따라가지 않고 링크 자체를 다시 만듭니다 (끊어진 링크도 그대로).
/// - 대상 폴더가 이미 있으면 그 안에 병합합니다.
/// - `src`가 폴더를 가리키는 링크면 링크를 따라가 내용을 복사합니다.
/// - `dst` 자신과 `exclude` 폴더는 원본 안에 있어도 건너뜁니다.
///
/// # Returns
/// 복사된 파일들의 총 바이트 수
pub fn copy_tree(src: &Path, dst: &Path, exclude: Option<&Path>) -> Result<u64> {
    let tree_error = |reason: String| Heic2JpgError::CopyTree {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        reason,
    };

    let mut bytes = 0;
    let mut dirs: Vec<(PathBuf, PathBuf)> = Vec::new();

    let walker = WalkDir::new(src)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !(same_file(e.path(), dst) || exclude.is_some_and(|x| same_file(e.path(), x)))
        });

    for entry in walker {
        let entry = entry.map_err(|e| tree_error(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| tree_error(e.to_string()))?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if entry.depth() == 0 || file_type.is_dir() {
            create_directory(&target)?;
            dirs.push((entry.path().to_path_buf(), target));
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target).map_err(|e| tree_error(e.to_string()))?;
        } else {
            bytes += copy_file_with_metadata(entry.path(), &target).map_err(|e| {
                Heic2JpgError::CopyFile {
                    from: entry.path().to_path_buf(),
                    to: target.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
    }

    // 하위 폴더에 쓰면 상위 폴더 수정 시간이 바뀌므로 깊은 폴더부터 적용
    for (from, to) in dirs.iter().rev() {
        let meta = fs::metadata(from).map_err(|e| tree_error(e.to_string()))?;
        copy_times(&meta, to).map_err(|e| tree_error(e.to_string()))?;
    }

    Ok(bytes)
}

/// 심볼릭 링크를 대상 위치에 그대로 재생성
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let link_target = fs::read_link(src)?;
    if fs::symlink_metadata(dst).is_ok() {
        fs::remove_file(dst)?;
    }

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&link_target, dst)
    }

    #[cfg(windows)]
    {
        if src.is_dir() {
            std::os::windows::fs::symlink_dir(&link_target, dst)
        } else {
            std::os::windows::fs::symlink_file(&link_target, dst)
        }
    }
}
