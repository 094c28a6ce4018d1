use std::path::PathBuf;
use thiserror::Error;

/// 标记解析器内部替换表或标签提取不一致时的错误
///
/// 这类错误属于程序错误，正确的替换表下不应出现
#[derive(Error, Debug, Clone)]
pub enum StructuralParseError {
    /// 模板引用了模式中不存在的捕获组
    #[error("替换表第{index}项的模式与模板不匹配: 模板引用了第{group}组，但模式只有{available}组")]
    MismatchedPatternTemplate {
        index: usize,
        group: usize,
        available: usize,
    },

    /// 替换表中的模式无法编译
    #[error("替换表第{index}项的模式无效: {source}")]
    InvalidPattern {
        index: usize,
        #[source]
        source: regex::Error,
    },

    /// 提取出的标签类型数量与内容数量不一致
    #[error("标签类型数量({types})与内容数量({texts})不一致")]
    MismatchedTextType { types: usize, texts: usize },

    /// 未知的标签类型
    #[error("未知的元素类型: {0}")]
    UnknownElementType(String),
}

#[derive(Error, Debug)]
pub enum FountainError {
    /// 解析器结构错误
    #[error("解析器结构错误: {0}")]
    StructuralParse(#[from] StructuralParseError),

    /// 不支持的文档格式
    #[error("不支持的文档格式: {0}")]
    UnsupportedFormat(String),

    /// 包或归档中找不到可用的内容文件
    #[error("找不到内容文件: {}", .0.display())]
    ContentNotFound(PathBuf),

    /// 文档没有已解析的元素，也没有可重新解析的源文本
    #[error("文档没有可解析的内容")]
    EmptyDocument,

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FountainResult<T> = Result<T, FountainError>;
