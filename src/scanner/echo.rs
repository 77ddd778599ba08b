use super::engine::{EcosystemSpec, PrefixScope, Receivers, Verb};
use super::gin::{GO_GROUP, GO_STRUCT};
use crate::model::{HttpMethod, Language, ProjectType};

/// Echo router registrations: `e.GET("/path", handler)`.
pub const ECHO: EcosystemSpec = EcosystemSpec {
    name: "Echo",
    project_type: ProjectType::Echo,
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
        Verb::new("TRACE", Some(HttpMethod::Trace)),
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
