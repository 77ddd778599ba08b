use super::engine::{EcosystemSpec, PrefixScope, Receivers, ReturnStyle, Signature, Verb};
use crate::model::{HttpMethod, Language, ProjectType};

/// Spring MVC annotations on `@RestController` / `@Controller` classes.
///
/// A `@RequestMapping` seen before the class declaration sets the base
/// path; after it, `@RequestMapping` is a route that defaults to GET unless
/// a `RequestMethod.X` argument says otherwise.
pub const SPRING: EcosystemSpec = EcosystemSpec {
    name: "Spring Boot",
    project_type: ProjectType::SpringBoot,
    language: Some(Language::Java),
    comment_prefixes: &["//", "/*", "*"],
    marker_prefix: "@",
    marker_suffix: "",
    verbs: &[
        Verb::new("GetMapping", Some(HttpMethod::Get)),
        Verb::new("PostMapping", Some(HttpMethod::Post)),
        Verb::new("PutMapping", Some(HttpMethod::Put)),
        Verb::new("DeleteMapping", Some(HttpMethod::Delete)),
        Verb::new("PatchMapping", Some(HttpMethod::Patch)),
        Verb::new("RequestMapping", Some(HttpMethod::Get)),
    ],
    verb_pattern: r#"@(?P<verb>{verbs})\b(?:\s*\(\s*(?:(?:value|path)\s*=\s*)?\{?\s*"(?P<path>[^"]*)")?"#,
    receivers: Receivers::Any,
    method_override: Some(r"RequestMethod\.(\w+)"),
    named_path: Some(r#"\b(?:value|path)\s*=\s*\{?\s*"([^"]*)""#),
    controller_markers: &["@RestController", "@Controller"],
    class_pattern: Some(r"(?:^|\s)(?:class|interface)\s+(\w+)"),
    prefix_pattern: Some(
        r#"@RequestMapping\b(?:\s*\(\s*(?:(?:value|path)\s*=\s*)?\{?\s*"([^"]*)")?"#,
    ),
    prefix_scope: PrefixScope::BeforeClass,
    bindings: &[],
    group: None,
    tags_pattern: None,
    chain: None,
    inline_handler: false,
    signature: Some(Signature {
        pattern: r"^(?:(?:public|protected|private|static|final|synchronized|abstract|default)\s+)*(?:<[^>]*>\s+)?(?P<ret>[\w$.\[\]?<>]+(?:\s*,\s*[\w$.\[\]?<>]+)*)\s+(?P<name>[A-Za-z_$][\w$]*)\s*\(",
        window: 10,
        returns: ReturnStyle::BeforeName,
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
        LineEngine::new(SPRING)
            .unwrap()
            .parse_file(content, Path::new("UserController.java"))
    }

    #[test]
    fn test_class_mapping_prefixes_method_mapping() {
        let endpoints = parse(
            r#"
@RestController
@RequestMapping("/api")
public class UserController {
    @GetMapping("/users")
    public List<User> list() {
        return service.findAll();
    }
}
"#,
        );

        assert_eq!(endpoints.len(), 1);
        let endpoint = &endpoints[0];
        assert_eq!(endpoint.api_path, "/api/users");
        assert_eq!(endpoint.class_name, "UserController");
        assert_eq!(endpoint.method_name, "list");
        assert_eq!(endpoint.http_method, Some(HttpMethod::Get));
        assert_eq!(endpoint.line_number, 5);
        assert_eq!(endpoint.return_type.as_deref(), Some("List<User>"));
        assert!(endpoint.parameters.is_empty());
    }

    #[test]
    fn test_request_method_override_and_signature() {
        let endpoints = parse(
            r#"
@RestController
public class OrderController {
    @RequestMapping(value = "/orders/{id}", method = RequestMethod.DELETE)
    @ResponseStatus(HttpStatus.NO_CONTENT)
    public void remove(@PathVariable Long id, @RequestParam Map<String, String> flags) {
    }

    @PostMapping(path = "/orders")
    public ResponseEntity<Order> create(@RequestBody Order order) {
    }

    @GetMapping
    public List<Order> all() {
    }
}
"#,
        );

        assert_eq!(endpoints.len(), 3);
        assert_eq!(endpoints[0].api_path, "/orders/{id}");
        assert_eq!(endpoints[0].http_method, Some(HttpMethod::Delete));
        assert_eq!(endpoints[0].method_name, "remove");
        assert_eq!(
            endpoints[0].parameters,
            ["@PathVariable Long id", "@RequestParam Map<String, String> flags"]
        );
        assert_eq!(endpoints[0].return_type.as_deref(), Some("void"));

        assert_eq!(endpoints[1].api_path, "/orders");
        assert_eq!(endpoints[1].http_method, Some(HttpMethod::Post));
        assert_eq!(endpoints[1].return_type.as_deref(), Some("ResponseEntity<Order>"));

        assert_eq!(endpoints[2].api_path, "/");
        assert_eq!(endpoints[2].method_name, "all");
    }

    #[test]
    fn test_named_path_after_other_arguments() {
        let endpoints = parse(
            r#"
@RestController
@RequestMapping(produces = "application/json", path = "/api")
public class OrderController {
    @RequestMapping(method = RequestMethod.POST, value = "/orders")
    public Order create(@RequestBody Order order) {
    }

    @GetMapping(produces = "application/json", value = "/items")
    public List<Item> items() {
    }

    @GetMapping("/search")
    public List<Item> search(@RequestParam(value = "q") String q) {
    }
}
"#,
        );

        let routes: Vec<_> = endpoints
            .iter()
            .map(|e| (e.api_path.as_str(), e.http_method, e.method_name.as_str()))
            .collect();
        assert_eq!(
            routes,
            [
                ("/api/orders", Some(HttpMethod::Post), "create"),
                ("/api/items", Some(HttpMethod::Get), "items"),
                ("/api/search", Some(HttpMethod::Get), "search"),
            ]
        );
    }

    #[test]
    fn test_mappings_outside_controllers_are_ignored() {
        let endpoints = parse(
            r#"
@Configuration
public class WebConfig {
    @GetMapping("/not-a-route")
    public String nope() { return ""; }
}
"#,
        );
        assert!(endpoints.is_empty());
    }

    #[test]
    fn test_controller_advice_is_not_a_controller() {
        let content = r#"
@ControllerAdvice
public class Errors {
    @RequestMapping("/error")
    public String handle() { return ""; }
}
"#;
        assert!(parse(content).is_empty());
    }

    #[test]
    fn test_handler_is_unknown_beyond_lookahead() {
        let mut content = String::from("@RestController\nclass A {\n@GetMapping(\"/x\")\n");
        content.push_str(&"\n".repeat(12));
        content.push_str("public String far() {}\n");

        let endpoints = parse(&content);
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].method_name, "unknown");
    }
}
