use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages a lab week can be written in.
/// Serialized/deserialized in `lowercase`; common aliases are accepted
/// (e.g., "c++", "cc", "js", "jsx", "py", "c#").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "cc", alias = "c++")]
    Cpp,
    C,
    Java,
    #[serde(alias = "c#")]
    CSharp,
    #[serde(alias = "py")]
    Python,
    #[serde(alias = "js")]
    JavaScript,
    #[serde(alias = "jsx")]
    React,
    Html,
}

/// How a language is treated by the grader.
///
/// - `Python`: `#` comments, indentation-based syntax.
/// - `CLike`: `//` and `/* */` comments, brace syntax, executed for output comparison.
/// - `Web`: markup and browser scripts, compared as literal source instead of executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFamily {
    Python,
    CLike,
    Web,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::React => "react",
            Language::Html => "html",
        }
    }

    pub fn family(self) -> LanguageFamily {
        match self {
            Language::Python => LanguageFamily::Python,
            Language::Html | Language::JavaScript | Language::React => LanguageFamily::Web,
            Language::Cpp | Language::C | Language::Java | Language::CSharp => {
                LanguageFamily::CLike
            }
        }
    }

    /// Web-family submissions skip execution and compare source text.
    pub fn is_web(self) -> bool {
        self.family() == LanguageFamily::Web
    }

    /// Languages the AI assessment service knows how to review.
    pub fn is_assessable(self) -> bool {
        matches!(
            self,
            Language::Cpp | Language::Python | Language::JavaScript | Language::React
        )
    }

    /// Statement detection uses Python rules only for Python; JS/JSX share the C rules.
    pub fn uses_python_syntax(self) -> bool {
        self.family() == LanguageFamily::Python
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpp" | "cc" | "c++" => Ok(Language::Cpp),
            "c" => Ok(Language::C),
            "java" => Ok(Language::Java),
            "csharp" | "c#" => Ok(Language::CSharp),
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            "react" | "jsx" => Ok(Language::React),
            "html" => Ok(Language::Html),
            other => Err(format!("Unsupported language: {other}")),
        }
    }
}
