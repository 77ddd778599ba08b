use super::engine::{EcosystemSpec, PrefixScope, Receivers, ReturnStyle, Signature, Verb};
use crate::model::{HttpMethod, ProjectType};

/// NestJS method decorators under a `@Controller('prefix')` class.
pub const NEST: EcosystemSpec = EcosystemSpec {
    name: "NestJS",
    project_type: ProjectType::Nest,
    language: None,
    comment_prefixes: &["//", "/*", "*"],
    marker_prefix: "@",
    marker_suffix: "(",
    verbs: &[
        Verb::new("Get", Some(HttpMethod::Get)),
        Verb::new("Post", Some(HttpMethod::Post)),
        Verb::new("Put", Some(HttpMethod::Put)),
        Verb::new("Delete", Some(HttpMethod::Delete)),
        Verb::new("Patch", Some(HttpMethod::Patch)),
        Verb::new("Head", Some(HttpMethod::Head)),
        Verb::new("Options", Some(HttpMethod::Options)),
        Verb::new("All", None),
    ],
    verb_pattern: r#"@(?P<verb>{verbs})\(\s*(?:['"`](?P<path>[^'"`]*)['"`])?"#,
    receivers: Receivers::Any,
    method_override: None,
    named_path: None,
    controller_markers: &[],
    class_pattern: Some(r"(?:^|\s)class\s+([\w$]+)"),
    prefix_pattern: Some(
        r#"@Controller\(\s*(?:\{[^}]*?path\s*:\s*)?(?:['"`]([^'"`]*)['"`])?"#,
    ),
    prefix_scope: PrefixScope::Anywhere,
    bindings: &[],
    group: None,
    tags_pattern: None,
    chain: None,
    inline_handler: false,
    signature: Some(Signature {
        pattern: r"^(?:(?:public|private|protected|static|async|override)\s+)*(?P<name>[A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*\(",
        window: 6,
        returns: ReturnStyle::Colon,
    }),
    default_class: "",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Language;
    use crate::scanner::engine::LineEngine;
    use std::path::Path;

    #[test]
    fn test_controller_routes() {
        let engine = LineEngine::new(NEST).unwrap();
        let content = r#"
import { Controller, Get, Post, Body, Param } from '@nestjs/common';

@Controller('cats')
export class CatsController {
  constructor(private readonly cats: CatsService) {}

  @Get()
  findAll(): Promise<Cat[]> {
    return this.cats.findAll();
  }

  @Get(':id')
  @UseGuards(AuthGuard)
  async findOne(@Param('id') id: string, @Query() query: Record<string, string>): Promise<Cat> {
    return this.cats.findOne(id);
  }

  @Post()
  @HttpCode(204)
  create(@Body() dto: CreateCatDto) {
  }

  @All('wildcard')
  any() {}
}
"#;
        assert!(engine.is_valid_file(content));

        let endpoints = engine.parse_file(content, Path::new("cats.controller.ts"));
        let summary: Vec<_> = endpoints
            .iter()
            .map(|e| (e.api_path.as_str(), e.handler(), e.http_method))
            .collect();
        assert_eq!(
            summary,
            [
                ("/cats", "CatsController.findAll".to_string(), Some(HttpMethod::Get)),
                ("/cats/:id", "CatsController.findOne".to_string(), Some(HttpMethod::Get)),
                ("/cats", "CatsController.create".to_string(), Some(HttpMethod::Post)),
                ("/cats/wildcard", "CatsController.any".to_string(), None),
            ]
        );

        assert_eq!(endpoints[0].return_type.as_deref(), Some("Promise<Cat[]>"));
        assert_eq!(
            endpoints[1].parameters,
            ["@Param('id') id: string", "@Query() query: Record<string, string>"]
        );
        assert_eq!(endpoints[1].return_type.as_deref(), Some("Promise<Cat>"));
        assert_eq!(endpoints[2].return_type, None);
        assert!(endpoints.iter().all(|e| e.language == Language::Typescript));
    }

    #[test]
    fn test_controller_without_prefix() {
        let engine = LineEngine::new(NEST).unwrap();
        let content =
            "@Controller()\nexport class AppController {\n  @Get('health')\n  check() {}\n}\n";
        let endpoints = engine.parse_file(content, Path::new("app.controller.ts"));
        assert_eq!(endpoints[0].api_path, "/health");
    }
}
