use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    SpringBoot,
    Express,
    Nest,
    Gin,
    Echo,
    #[serde(rename = "fastapi")]
    FastApi,
    Unknown,
}

impl ProjectType {
    pub const SUPPORTED: [ProjectType; 6] = [
        ProjectType::SpringBoot,
        ProjectType::Express,
        ProjectType::Nest,
        ProjectType::Gin,
        ProjectType::Echo,
        ProjectType::FastApi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::SpringBoot => "spring-boot",
            ProjectType::Express => "express",
            ProjectType::Nest => "nest",
            ProjectType::Gin => "gin",
            ProjectType::Echo => "echo",
            ProjectType::FastApi => "fastapi",
            ProjectType::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::SpringBoot => "Spring Boot",
            ProjectType::Express => "Express",
            ProjectType::Nest => "NestJS",
            ProjectType::Gin => "Gin",
            ProjectType::Echo => "Echo",
            ProjectType::FastApi => "FastAPI",
            ProjectType::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spring-boot" | "springboot" | "spring" => Ok(ProjectType::SpringBoot),
            "express" => Ok(ProjectType::Express),
            "nest" | "nestjs" => Ok(ProjectType::Nest),
            "gin" => Ok(ProjectType::Gin),
            "echo" => Ok(ProjectType::Echo),
            "fastapi" => Ok(ProjectType::FastApi),
            "unknown" => Ok(ProjectType::Unknown),
            _ => Err(format!(
                "Unknown ecosystem: {}. Use: spring-boot, express, nest, gin, echo, fastapi",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Go,
    Javascript,
    Typescript,
    Python,
}

impl Language {
    /// Picks JavaScript or TypeScript from a file extension.
    pub fn from_script_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts" | "tsx" | "mts" | "cts") => Language::Typescript,
            _ => Language::Javascript,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Go => "go",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Python => "python",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "TRACE" => Ok(HttpMethod::Trace),
            _ => Err(format!("Unknown HTTP method: {}", s)),
        }
    }
}

/// One discovered HTTP route.
///
/// `api_path` always starts with a single `/`, never contains `//` and only
/// ends with `/` when it is exactly `/`. `line_number` is 1-based and points
/// at the line carrying the verb marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    pub api_path: String,
    pub class_name: String,
    pub method_name: String,
    pub file_path: PathBuf,
    pub line_number: usize,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<HttpMethod>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

impl ApiEndpoint {
    pub fn new(
        api_path: impl Into<String>,
        file_path: impl Into<PathBuf>,
        line_number: usize,
        language: Language,
    ) -> Self {
        Self {
            api_path: api_path.into(),
            class_name: String::new(),
            method_name: String::new(),
            file_path: file_path.into(),
            line_number,
            language,
            http_method: None,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    pub fn with_handler(
        mut self,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        self.class_name = class_name.into();
        self.method_name = method_name.into();
        self
    }

    pub fn with_method(mut self, http_method: Option<HttpMethod>) -> Self {
        self.http_method = http_method;
        self
    }

    pub fn with_signature(mut self, parameters: Vec<String>, return_type: Option<String>) -> Self {
        self.parameters = parameters;
        self.return_type = return_type;
        self
    }

    /// `Class.method`, or just the method when no class is known.
    pub fn handler(&self) -> String {
        if self.class_name.is_empty() {
            self.method_name.clone()
        } else {
            format!("{}.{}", self.class_name, self.method_name)
        }
    }

    /// `file:line`, suitable for jump-to-location.
    pub fn location(&self) -> String {
        format!("{}:{}", self.file_path.display(), self.line_number)
    }

    /// Case-insensitive substring match over path, class and method.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.api_path.to_lowercase().contains(needle)
            || self.class_name.to_lowercase().contains(needle)
            || self.method_name.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Options".parse::<HttpMethod>().unwrap(), HttpMethod::Options);
        assert!("FETCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_project_type_round_trips_through_str() {
        for ty in ProjectType::SUPPORTED {
            assert_eq!(ty.as_str().parse::<ProjectType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_script_language_from_extension() {
        assert_eq!(Language::from_script_path(Path::new("a/b.ts")), Language::Typescript);
        assert_eq!(Language::from_script_path(Path::new("a/b.js")), Language::Javascript);
        assert_eq!(Language::from_script_path(Path::new("a/b")), Language::Javascript);
    }

    #[test]
    fn test_handler_and_location() {
        let endpoint =
            ApiEndpoint::new("/ping", "main.go", 7, Language::Go).with_handler("main", "ping");
        assert_eq!(endpoint.handler(), "main.ping");
        assert_eq!(endpoint.location(), "main.go:7");

        let bare =
            ApiEndpoint::new("/ping", "app.py", 3, Language::Python).with_handler("", "ping");
        assert_eq!(bare.handler(), "ping");
    }

    #[test]
    fn test_endpoint_serializes_camel_case() {
        let endpoint = ApiEndpoint::new("/users", "app.js", 1, Language::Javascript)
            .with_handler("default", "list")
            .with_method(Some(HttpMethod::Get));
        let json = serde_json::to_value(&endpoint).unwrap();
        assert_eq!(json["apiPath"], "/users");
        assert_eq!(json["httpMethod"], "GET");
        assert_eq!(json["lineNumber"], 1);
        assert!(json.get("returnType").is_none());
    }
}
