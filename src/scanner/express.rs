use super::engine::{Chain, EcosystemSpec, PrefixScope, Receivers, Verb};
use crate::model::{HttpMethod, ProjectType};

/// Express registrations on `app`, `router` or any name bound to
/// `express()` / `Router()` earlier in the file. `route('/x')` chains are
/// followed across lines that start with `.`, including links that come
/// after a multi-line inline handler.
pub const EXPRESS: EcosystemSpec = EcosystemSpec {
    name: "Express",
    project_type: ProjectType::Express,
    language: None,
    comment_prefixes: &["//", "/*", "*"],
    marker_prefix: ".",
    marker_suffix: "(",
    verbs: &[
        Verb::new("get", Some(HttpMethod::Get)),
        Verb::new("post", Some(HttpMethod::Post)),
        Verb::new("put", Some(HttpMethod::Put)),
        Verb::new("delete", Some(HttpMethod::Delete)),
        Verb::new("patch", Some(HttpMethod::Patch)),
        Verb::new("head", Some(HttpMethod::Head)),
        Verb::new("options", Some(HttpMethod::Options)),
        Verb::new("all", None),
    ],
    verb_pattern: r#"(?P<recv>[\w$]+)\.(?P<verb>{verbs})\(\s*['"`](?P<path>[^'"`]*)['"`]\s*,"#,
    receivers: Receivers::Bound(&["app", "router"]),
    method_override: None,
    named_path: None,
    controller_markers: &[],
    class_pattern: Some(r"(?:^|\s)class\s+([\w$]+)"),
    prefix_pattern: Some(r#"\.use\(\s*['"`]([^'"`]*)['"`]\s*,"#),
    prefix_scope: PrefixScope::Anywhere,
    bindings: &[
        r"([\w$]+)\s*=\s*express\(\s*\)",
        r"([\w$]+)\s*=\s*(?:express\.)?Router\(",
    ],
    group: None,
    tags_pattern: None,
    chain: Some(Chain {
        open: r#"\.route\(\s*['"`]([^'"`]*)['"`]\s*\)"#,
        link: r"\.(?P<verb>{verbs})\(",
    }),
    inline_handler: true,
    signature: None,
    default_class: "default",
};
