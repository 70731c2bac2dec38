//! # Glow Core
//!
//! AliceGlow 관리 콘솔의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 콘솔 전반에서 사용되는 기본 타입을 제공합니다:
//! - 상품, 판매, 사용자 도메인 모델
//! - 대시보드 지표 계산
//! - 입력 폼 검증 규칙
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
