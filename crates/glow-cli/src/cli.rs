//! 명령행 인자 정의.

use clap::{Parser, Subcommand};
use glow_core::{LogConfig, LoggingConfig, SaleItemInput, DEFAULT_CONFIG_PATH};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(name = "glow")]
#[command(about = "AliceGlow 관리 콘솔 CLI - 상품, 판매, 사용자 관리", long_about = None)]
#[command(version)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// 데모 모드 (백엔드 없이 메모리 데이터 사용)
    #[arg(long, global = true, default_value = "false")]
    pub demo: bool,

    /// 출력 형식 (table, json)
    #[arg(long, global = true, default_value = "table")]
    pub format: String,

    /// 상세 로그 출력 (debug 레벨)
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// `[logging]` 설정에 `--verbose` 를 반영한 로그 설정.
    pub fn log_config(&self, settings: &LoggingConfig) -> LogConfig {
        let config = LogConfig::from_settings(settings);
        if self.verbose {
            config.with_level("debug")
        } else {
            config
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 로그인 (토큰 발급 후 저장)
    Login {
        /// 이메일
        #[arg(short, long)]
        email: String,

        /// 비밀번호
        #[arg(short, long)]
        password: String,
    },

    /// 로그아웃 (저장된 토큰 삭제)
    Logout,

    /// 현재 사용자 정보
    Whoami,

    /// 접근 가능한 메뉴 목록
    Nav,

    /// 대시보드 지표 (상품 수, 오늘 판매/매출)
    Dashboard,

    /// 상품 관리
    Products {
        #[command(subcommand)]
        action: ProductCommand,
    },

    /// 판매 관리
    Sales {
        #[command(subcommand)]
        action: SaleCommand,
    },

    /// 사용자 관리 (관리자 전용)
    Users {
        #[command(subcommand)]
        action: UserCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// 상품 목록
    List,

    /// 상품 등록 (관리자 전용)
    Create {
        /// 상품명
        #[arg(short, long)]
        name: String,

        /// 원가
        #[arg(short, long)]
        cost_price: Decimal,

        /// 재고 수량
        #[arg(short, long, default_value = "0")]
        stock: i64,
    },

    /// 상품 수정 (관리자 전용, 지정한 항목만 변경)
    Update {
        /// 상품 ID
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        cost_price: Option<Decimal>,

        #[arg(short, long)]
        stock: Option<i64>,
    },

    /// 상품 삭제 (관리자 전용)
    Delete {
        /// 상품 ID
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum SaleCommand {
    /// 판매 목록
    List,

    /// 판매 상세
    Show {
        /// 판매 ID
        id: i64,
    },

    /// 판매 등록
    Create {
        /// 고객명
        #[arg(short, long)]
        client: String,

        /// 품목 (상품ID:수량, 반복 가능. 예: --item 3:2)
        #[arg(short, long = "item", value_parser = parse_item, required = true)]
        items: Vec<SaleItemInput>,
    },

    /// 판매 취소
    Cancel {
        /// 판매 ID
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// 사용자 목록
    List,

    /// 사용자 등록
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// 관리자 권한 부여
        #[arg(long, default_value = "false")]
        admin: bool,
    },

    /// 사용자 수정 (지정한 항목만 변경)
    Update {
        /// 사용자 ID
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        password: Option<String>,

        /// 관리자 여부 (true/false)
        #[arg(long)]
        admin: Option<bool>,
    },

    /// 사용자 삭제
    Delete {
        /// 사용자 ID
        id: i64,
    },
}

/// `상품ID:수량` 형식의 품목 파싱.
pub fn parse_item(s: &str) -> Result<SaleItemInput, String> {
    let (product, quantity) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid item: {}. Use PRODUCT_ID:QUANTITY", s))?;
    let product_id = product
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("Invalid product id '{}': {}", product, e))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("Invalid quantity '{}': {}", quantity, e))?;
    Ok(SaleItemInput {
        product_id,
        quantity,
    })
}
