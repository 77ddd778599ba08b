use super::engine::{EcosystemSpec, Group, PrefixScope, Receivers, Verb};
use crate::model::{HttpMethod, Language, ProjectType};

/// Struct declarations name the handler owner in Go.
pub(super) const GO_STRUCT: &str = r"^type\s+(\w+)\s+struct\b";

/// Route groups: `v1 := r.Group("/v1")`, ended by the next `}`.
pub(super) const GO_GROUP: Group = Group {
    open: r#"\.Group\(\s*["`]([^"`]*)["`]"#,
    close: "}",
};

/// Gin router registrations: `r.GET("/path", handler)`.
pub const GIN: EcosystemSpec = EcosystemSpec {
    name: "Gin",
    project_type: ProjectType::Gin,
    language: Some(Language::Go),
    comment_prefixes: &["//", "/*"],
    marker_prefix: ".",
    marker_suffix: "(",
    verbs: &[
        Verb::new("GET", Some(HttpMethod::Get)),
        Verb::new("POST", Some(HttpMethod::Post)),
        Verb::new("PUT", Some(HttpMethod::Put)),
        Verb::new("DELETE", Some(HttpMethod::Delete)),
        Verb::new("PATCH", Some(HttpMethod::Patch)),
        Verb::new("HEAD", Some(HttpMethod::Head)),
        Verb::new("OPTIONS", Some(HttpMethod::Options)),
        Verb::new("Any", None),
    ],
    verb_pattern: r#"(?P<recv>\w+)\.(?P<verb>{verbs})\(\s*["`](?P<path>[^"`]*)["`]\s*,"#,
    receivers: Receivers::Any,
    method_override: None,
    named_path: None,
    controller_markers: &[],
    class_pattern: Some(GO_STRUCT),
    prefix_pattern: None,
    prefix_scope: PrefixScope::Anywhere,
    bindings: &[],
    group: Some(GO_GROUP),
    tags_pattern: None,
    chain: None,
    inline_handler: true,
    signature: None,
    default_class: "main",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApiEndpoint;
    use crate::scanner::engine::LineEngine;
    use std::path::Path;

    fn parse(content: &str) -> Vec<ApiEndpoint> {
        LineEngine::new(GIN)
            .unwrap()
            .parse_file(content, Path::new("main.go"))
    }

    #[test]
    fn test_minimal_route() {
        let endpoints = parse("r := gin.Default()\nr.GET(\"/ping\", handler)");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].api_path, "/ping");
        assert_eq!(endpoints[0].http_method, Some(HttpMethod::Get));
        assert_eq!(endpoints[0].class_name, "main");
        assert_eq!(endpoints[0].method_name, "handler");
        assert_eq!(endpoints[0].line_number, 2);
        assert_eq!(endpoints[0].language, Language::Go);
    }

    #[test]
    fn test_groups_and_qualified_handlers() {
        let endpoints = parse(
            r#"
func setupRouter(h *UserHandler) *gin.Engine {
	r := gin.Default()
	v1 := r.Group("/api/v1")
	{
		v1.GET("/users", h.List)
		v1.POST("/users", auth, h.Create)
		v1.Any("/echo", func(c *gin.Context) {
		})
	}
	r.GET("/health", health)
	return r
}
"#,
        );

        let summary: Vec<_> = endpoints
            .iter()
            .map(|e| (e.api_path.as_str(), e.handler(), e.http_method))
            .collect();
        assert_eq!(
            summary,
            [
                ("/api/v1/users", "h.List".to_string(), Some(HttpMethod::Get)),
                ("/api/v1/users", "h.Create".to_string(), Some(HttpMethod::Post)),
                ("/api/v1/echo", "main.unknown".to_string(), None),
                ("/health", "main.health".to_string(), Some(HttpMethod::Get)),
            ]
        );
    }

    #[test]
    fn test_struct_declaration_names_owner() {
        let endpoints = parse(
            r#"
type Server struct {
	router *gin.Engine
}
s.router.GET("/status", status)
"#,
        );
        assert_eq!(endpoints[0].class_name, "Server");
    }

    #[test]
    fn test_static_routes_are_not_endpoints() {
        assert!(parse(r#"r.Static("/assets", "./assets")"#).is_empty());
    }
}
