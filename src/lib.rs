//! heic2jpg - HEIC TO JPG CONVERTER
//!
//! HEIC/HEIF 이미지를 외부 코덱(libheif의 `heif-convert`)으로 JPG로 변환하고,
//! 나머지 파일과 폴더는 출력 트리에 그대로 복제하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 📂 **트리 복제**: 입력 폴더 구조를 출력 폴더에 그대로 재현
//! - 🔁 **재귀 선택**: 하위 폴더를 변환할지, 통째로 복사할지 선택
//! - 🛡️ **안전한 호출**: 셸 없이 인자 벡터로 코덱 실행, 종료 코드 확인
//! - 📊 **통계**: 변환/복사/실패 수, 복사 용량, 처리 시간 표시
//! - 🧪 **드라이런 모드**: 실제 작업 없이 처리될 항목 미리 확인
//!
//! # 예제
//!
//! ```bash
//! # 단일 파일 (photo.jpg 생성)
//! heic2jpg -d photo.HEIC
//!
//! # 폴더 전체를 재귀적으로 변환
//! heic2jpg -d ./album -o ./album_jpg --recursive
//! ```

pub mod cli;
pub mod codec;
pub mod converter;
pub mod error;
pub mod fsops;
pub mod stats;

// Re-exports for convenient access
pub use cli::Args;
pub use codec::{Codec, CodecOutcome};
pub use converter::{ConvertEvent, ConvertOptions, TreeConverter};
pub use error::{Heic2JpgError, Result};
pub use stats::{format_bytes, format_duration, CodecFailure, Statistics};
