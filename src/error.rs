use thiserror::Error;

#[derive(Error, Debug)]
pub enum CotacaoError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0}（csv / xlsx / json）")]
    UnsupportedFormat(String),

    #[error("価格表ファイルが不正: {0}")]
    InvalidCatalogFile(String),

    #[error("Excel読み込みエラー: {0}")]
    XlsxRead(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] cotacao_common::Error),
}

impl CotacaoError {
    /// 呼び出し側の入力に起因するエラーか
    pub fn is_input_error(&self) -> bool {
        matches!(self, CotacaoError::Common(e) if e.is_input_error())
    }
}

pub type Result<T> = std::result::Result<T, CotacaoError>;
