use super::engine::{EcosystemSpec, PrefixScope, Receivers, ReturnStyle, Signature, Verb};
use crate::model::{HttpMethod, Language, ProjectType};

/// FastAPI path-operation decorators on `FastAPI()` / `APIRouter()` objects.
///
/// Route `tags=[...]` become the class name of the endpoint (and of later
/// ones in the file until another tag list appears). A router created with
/// `prefix=` sets the base path.
pub const FASTAPI: EcosystemSpec = EcosystemSpec {
    name: "FastAPI",
    project_type: ProjectType::FastApi,
    language: Some(Language::Python),
    comment_prefixes: &["#"],
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
        Verb::new("trace", Some(HttpMethod::Trace)),
        Verb::new("api_route", None),
    ],
    verb_pattern: r#"@?(?P<recv>\w+)\.(?P<verb>{verbs})\(\s*(?:path\s*=\s*)?['"](?P<path>[^'"]*)['"]"#,
    receivers: Receivers::Bound(&["app", "router"]),
    method_override: None,
    named_path: None,
    controller_markers: &[],
    class_pattern: None,
    prefix_pattern: Some(r#"APIRouter\([^)]*?prefix\s*=\s*['"]([^'"]*)['"]"#),
    prefix_scope: PrefixScope::Anywhere,
    bindings: &[r"^(\w+)\s*(?::\s*[\w.]+\s*)?=\s*(?:fastapi\.)?(?:FastAPI|APIRouter)\("],
    group: None,
    tags_pattern: Some(r"tags\s*=\s*\[([^\]]*)\]"),
    chain: None,
    inline_handler: false,
    signature: Some(Signature {
        pattern: r"^(?:async\s+)?def\s+(?P<name>\w+)\s*\(",
        window: 5,
        returns: ReturnStyle::Arrow,
    }),
    default_class: "",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApiEndpoint;
    use crate::scanner::engine::LineEngine;
    use std::path::Path;

    fn parse(content: &str) -> Vec<ApiEndpoint> {
        LineEngine::new(FASTAPI)
            .unwrap()
            .parse_file(content, Path::new("main.py"))
    }

    #[test]
    fn test_app_routes_with_signatures() {
        let endpoints = parse(
            r#"
from fastapi import FastAPI

app = FastAPI()

@app.get("/")
async def root():
    return {"message": "Hello World"}

@app.post("/items/{item_id}")
# create or replace
def upsert(item_id: int, item: Item, q: Union[str, None] = None) -> Item:
    return item
"#,
        );

        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].api_path, "/");
        assert_eq!(endpoints[0].handler(), "root");
        assert_eq!(endpoints[0].line_number, 6);
        assert_eq!(endpoints[1].api_path, "/items/{item_id}");
        assert_eq!(endpoints[1].http_method, Some(HttpMethod::Post));
        assert_eq!(
            endpoints[1].parameters,
            ["item_id: int", "item: Item", "q: Union[str, None] = None"]
        );
        assert_eq!(endpoints[1].return_type.as_deref(), Some("Item"));
    }

    #[test]
    fn test_router_prefix_and_tags() {
        let endpoints = parse(
            r#"
users = APIRouter(prefix="/users", tags=["users"])

@users.get("/{user_id}", tags=["users", "admin"])
def read_user(user_id: int):
    pass

@users.delete("/{user_id}")
def delete_user(user_id: int):
    pass
"#,
        );

        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].api_path, "/users/{user_id}");
        assert_eq!(endpoints[0].class_name, "users, admin");
        assert_eq!(endpoints[1].api_path, "/users/{user_id}");
        assert_eq!(endpoints[1].class_name, "users, admin");
        assert_eq!(endpoints[1].http_method, Some(HttpMethod::Delete));
    }

    #[test]
    fn test_http_clients_are_not_routes() {
        let content = r#"
import requests
resp = requests.get("https://example.com/api")
"#;
        assert!(parse(content).is_empty());
    }

    #[test]
    fn test_api_route_has_no_single_method() {
        let endpoints =
            parse("@app.api_route(\"/multi\", methods=[\"GET\", \"POST\"])\ndef multi():\n    pass\n");
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].http_method, None);
        assert_eq!(endpoints[0].method_name, "multi");
    }
}
