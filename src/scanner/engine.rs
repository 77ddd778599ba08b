//! Generic single-pass line scanner.
//!
//! Every ecosystem is described by an [`EcosystemSpec`]: a verb table plus a
//! handful of regex templates for controller markers, class declarations,
//! base-path declarations, router bindings, groups and handler signatures.
//! [`LineEngine`] compiles one spec and walks a file once, top to bottom,
//! carrying a small state record between lines.
//!
//! Templates may contain the placeholder `{verbs}`, which is replaced by an
//! alternation of the table's verb tokens before compilation.

use regex::{Match, Regex};
use std::path::Path;

use crate::error::{Result, ScanError};
use crate::model::{ApiEndpoint, HttpMethod, Language, ProjectType};
use crate::path::combine_paths;

/// Method name recorded when no handler can be resolved.
pub const UNKNOWN_HANDLER: &str = "unknown";

/// One entry of an ecosystem's verb vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct Verb {
    pub token: &'static str,
    /// `None` for catch-all registrations such as Express `all`.
    pub method: Option<HttpMethod>,
}

impl Verb {
    pub const fn new(token: &'static str, method: Option<HttpMethod>) -> Self {
        Self { token, method }
    }
}

/// Which call receivers may carry a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receivers {
    /// Any receiver, or the verb pattern has no receiver at all.
    Any,
    /// Only these names plus whatever the binding patterns capture.
    Bound(&'static [&'static str]),
}

/// Where a base-path declaration is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixScope {
    Anywhere,
    /// Only before the first class declaration of the file.
    BeforeClass,
}

/// Where a handler signature keeps its return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnStyle {
    /// In the `ret` capture group, ahead of the name (Java).
    BeforeName,
    /// After the parameter list, introduced by `->` (Python).
    Arrow,
    /// After the parameter list, introduced by `:` (TypeScript).
    Colon,
}

/// Grammar used by the bounded forward lookahead for handler names.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    /// Must define a `name` capture group.
    pub pattern: &'static str,
    /// Maximum number of lines inspected after the verb marker.
    pub window: usize,
    pub returns: ReturnStyle,
}

/// Route grouping call and the token that ends it.
#[derive(Debug, Clone, Copy)]
pub struct Group {
    /// Capture group 1 is the group prefix.
    pub open: &'static str,
    pub close: &'static str,
}

/// Chained route builder, e.g. `router.route('/x').get(a).post(b)`.
#[derive(Debug, Clone, Copy)]
pub struct Chain {
    /// Capture group 1 is the shared route.
    pub open: &'static str,
    /// Must define a `verb` capture group.
    pub link: &'static str,
}

/// Data record describing one web framework's routing syntax.
#[derive(Debug, Clone, Copy)]
pub struct EcosystemSpec {
    pub name: &'static str,
    pub project_type: ProjectType,
    /// `None` picks JavaScript or TypeScript from the file extension.
    pub language: Option<Language>,
    pub comment_prefixes: &'static [&'static str],
    /// Literal text around a verb token that every verb match contains,
    /// used by the fast file gate.
    pub marker_prefix: &'static str,
    pub marker_suffix: &'static str,
    pub verbs: &'static [Verb],
    /// Defines `verb`, and optionally `recv` and `path`, capture groups.
    pub verb_pattern: &'static str,
    pub receivers: Receivers,
    /// Capture group 1 overrides the verb's method when found after the marker.
    pub method_override: Option<&'static str>,
    /// Capture group 1 is a route given as a named argument. It wins over
    /// the positional `path` capture wherever it appears in the arguments.
    pub named_path: Option<&'static str>,
    /// When non-empty, verbs are ignored until one of these tokens is seen.
    pub controller_markers: &'static [&'static str],
    pub class_pattern: Option<&'static str>,
    pub prefix_pattern: Option<&'static str>,
    pub prefix_scope: PrefixScope,
    pub bindings: &'static [&'static str],
    pub group: Option<Group>,
    pub tags_pattern: Option<&'static str>,
    pub chain: Option<Chain>,
    /// Resolve handlers from the route call's last argument.
    pub inline_handler: bool,
    pub signature: Option<Signature>,
    /// Class name used when neither state nor tags provide one.
    pub default_class: &'static str,
}

/// A compiled [`EcosystemSpec`].
#[derive(Debug)]
pub struct LineEngine {
    spec: EcosystemSpec,
    markers: Vec<String>,
    verb: Regex,
    method_override: Option<Regex>,
    named_path: Option<Regex>,
    class: Option<Regex>,
    prefix: Option<Regex>,
    bindings: Vec<Regex>,
    group: Option<Regex>,
    tags: Option<Regex>,
    chain: Option<(Regex, Regex)>,
    signature: Option<(Regex, Signature)>,
}

/// Per-file scan state carried from line to line.
#[derive(Debug)]
struct LineState {
    class_name: Option<String>,
    base_path: String,
    receivers: Vec<String>,
    group_prefix: Option<String>,
    tags: Vec<String>,
    in_controller: bool,
    chain_path: Option<String>,
    /// Brackets left open by the current chain, e.g. an inline handler body.
    chain_depth: usize,
}

impl LineState {
    fn new(spec: &EcosystemSpec) -> Self {
        let receivers = match spec.receivers {
            Receivers::Bound(names) => names.iter().map(|n| n.to_string()).collect(),
            Receivers::Any => Vec::new(),
        };
        Self {
            class_name: None,
            base_path: String::new(),
            receivers,
            group_prefix: None,
            tags: Vec::new(),
            in_controller: false,
            chain_path: None,
            chain_depth: 0,
        }
    }

    fn route_path(&self, route: &str) -> String {
        combine_paths([
            self.base_path.as_str(),
            self.group_prefix.as_deref().unwrap_or(""),
            route,
        ])
    }

    fn class_for(&self, spec: &EcosystemSpec) -> String {
        if !self.tags.is_empty() {
            return self.tags.join(", ");
        }
        self.class_name
            .clone()
            .unwrap_or_else(|| spec.default_class.to_string())
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Declaration {
    state: bool,
    group: bool,
}

impl Declaration {
    fn any(&self) -> bool {
        self.state || self.group
    }
}

struct FileContext<'a> {
    path: &'a Path,
    language: Language,
    lines: &'a [&'a str],
}

#[derive(Debug, PartialEq, Eq)]
struct ResolvedSignature {
    name: String,
    parameters: Vec<String>,
    return_type: Option<String>,
}

impl LineEngine {
    /// Compiles every template of `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if a template is not a valid regex.
    pub fn new(spec: EcosystemSpec) -> Result<Self> {
        let verbs = verb_alternation(spec.verbs);
        let compile = |pattern: &str| {
            Regex::new(&pattern.replace("{verbs}", &verbs)).map_err(|source| ScanError::Pattern {
                ecosystem: spec.name,
                source,
            })
        };
        let optional = |pattern: Option<&str>| pattern.map(|p| compile(p)).transpose();

        Ok(Self {
            markers: spec
                .verbs
                .iter()
                .map(|v| format!("{}{}{}", spec.marker_prefix, v.token, spec.marker_suffix))
                .collect(),
            verb: compile(spec.verb_pattern)?,
            method_override: optional(spec.method_override)?,
            named_path: optional(spec.named_path)?,
            class: optional(spec.class_pattern)?,
            prefix: optional(spec.prefix_pattern)?,
            bindings: spec
                .bindings
                .iter()
                .map(|p| compile(*p))
                .collect::<Result<Vec<_>>>()?,
            group: optional(spec.group.map(|g| g.open))?,
            tags: optional(spec.tags_pattern)?,
            chain: match spec.chain {
                Some(chain) => Some((compile(chain.open)?, compile(chain.link)?)),
                None => None,
            },
            signature: match spec.signature {
                Some(signature) => Some((compile(signature.pattern)?, signature)),
                None => None,
            },
            spec,
        })
    }

    pub fn spec(&self) -> &EcosystemSpec {
        &self.spec
    }

    /// Cheap substring gate run before a full parse.
    ///
    /// Every endpoint the parser emits comes from a line containing one of
    /// the verb markers (and, where required, after a controller marker), so
    /// a file rejected here can never yield an endpoint.
    pub fn is_valid_file(&self, content: &str) -> bool {
        let has_verb = self.markers.iter().any(|m| content.contains(m.as_str()));
        let has_controller = self.spec.controller_markers.is_empty()
            || self.spec.controller_markers.iter().any(|m| content.contains(m));
        has_verb && has_controller
    }

    /// Walks `content` once and returns every endpoint found, in line order.
    pub fn parse_file(&self, content: &str, file_path: &Path) -> Vec<ApiEndpoint> {
        let lines: Vec<&str> = content.lines().map(str::trim).collect();
        let ctx = FileContext {
            path: file_path,
            language: self
                .spec
                .language
                .unwrap_or_else(|| Language::from_script_path(file_path)),
            lines: &lines,
        };
        let mut state = LineState::new(&self.spec);
        let mut endpoints = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() || self.is_comment(line) {
                continue;
            }

            let declared = self.update_state(line, &mut state);

            if !declared.group
                && state.group_prefix.is_some()
                && self.spec.group.is_some_and(|g| line.contains(g.close))
            {
                state.group_prefix = None;
            }

            if self.follow_chain(&ctx, index, line, &mut state, &mut endpoints) {
                continue;
            }
            if declared.any() {
                continue;
            }
            if !self.spec.controller_markers.is_empty() && !state.in_controller {
                continue;
            }

            self.match_verbs(&ctx, index, line, &state, &mut endpoints);
        }

        endpoints
    }

    fn is_comment(&self, line: &str) -> bool {
        self.spec.comment_prefixes.iter().any(|p| line.starts_with(p))
    }

    fn update_state(&self, line: &str, state: &mut LineState) -> Declaration {
        let mut declared = Declaration::default();

        if self
            .spec
            .controller_markers
            .iter()
            .any(|m| contains_token(line, m))
        {
            state.in_controller = true;
            declared.state = true;
        }

        if let Some(caps) = self.prefix.as_ref().and_then(|re| re.captures(line)) {
            let in_scope = match self.spec.prefix_scope {
                PrefixScope::Anywhere => true,
                PrefixScope::BeforeClass => state.class_name.is_none(),
            };
            if in_scope {
                let declared_at = caps.get(0).map_or(0, |m| m.start());
                state.base_path = self
                    .named_argument(&line[declared_at..])
                    .or_else(|| caps.get(1).map(|m| m.as_str()))
                    .unwrap_or("")
                    .to_string();
                declared.state = true;
            }
        }

        if let Some(name) = self
            .class
            .as_ref()
            .and_then(|re| re.captures(line))
            .and_then(|caps| caps.get(1))
        {
            state.class_name = Some(name.as_str().to_string());
            declared.state = true;
        }

        for binding in &self.bindings {
            for caps in binding.captures_iter(line) {
                if let Some(name) = caps.get(1) {
                    if !state.receivers.iter().any(|r| r == name.as_str()) {
                        state.receivers.push(name.as_str().to_string());
                    }
                    declared.state = true;
                }
            }
        }

        if let Some(caps) = self.group.as_ref().and_then(|re| re.captures(line)) {
            state.group_prefix = Some(caps.get(1).map_or("", |m| m.as_str()).to_string());
            declared.group = true;
        }

        if let Some(list) = self
            .tags
            .as_ref()
            .and_then(|re| re.captures(line))
            .and_then(|caps| caps.get(1))
        {
            state.tags = parse_tags(list.as_str());
        }

        declared
    }

    /// Route passed by name to the call or annotation that starts `text`.
    fn named_argument<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.named_path
            .as_ref()
            .and_then(|re| re.captures(leading_arguments(text)))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn match_verbs(
        &self,
        ctx: &FileContext<'_>,
        index: usize,
        line: &str,
        state: &LineState,
        out: &mut Vec<ApiEndpoint>,
    ) {
        let found: Vec<_> = self.verb.captures_iter(line).collect();

        for (i, caps) in found.iter().enumerate() {
            let (Some(whole), Some(token)) = (caps.get(0), caps.name("verb")) else {
                continue;
            };
            let Some(verb) = self.verb_for(token.as_str()) else {
                continue;
            };
            if !self.receiver_bound(caps.name("recv"), state) {
                continue;
            }

            let end = found
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(line.len(), |m| m.start());
            let args = &line[whole.end()..end];

            let http_method = self
                .method_override
                .as_ref()
                .and_then(|re| re.captures(args))
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())
                .or(verb.method);
            let route = self
                .named_argument(&line[whole.start()..end])
                .or_else(|| caps.name("path").map(|m| m.as_str()))
                .unwrap_or("");

            self.emit(ctx, state, index, route, http_method, args, out);
        }
    }

    /// Handles chained route builders. Returns true when the line belonged
    /// to a chain.
    fn follow_chain(
        &self,
        ctx: &FileContext<'_>,
        index: usize,
        line: &str,
        state: &mut LineState,
        out: &mut Vec<ApiEndpoint>,
    ) -> bool {
        let Some((open, link)) = &self.chain else {
            return false;
        };

        if let Some(caps) = open.captures(line) {
            if let (Some(whole), Some(route)) = (caps.get(0), caps.get(1)) {
                let rest = &line[whole.end()..];
                state.chain_path = Some(route.as_str().to_string());
                self.emit_links(ctx, index, link, rest, state, out);
                state.chain_depth = bracket_depth(rest, 0).0;
                if state.chain_depth == 0 && line.ends_with(';') {
                    state.chain_path = None;
                }
                return true;
            }
        }

        if state.chain_path.is_none() {
            return false;
        }

        // Links continue on lines starting with `.` once every bracket the
        // chain opened is closed again.
        let (depth, settled_at) = bracket_depth(line, state.chain_depth);
        match settled_at.map(|at| line[at..].trim_start()) {
            Some(rest) if rest.starts_with('.') => {
                self.emit_links(ctx, index, link, rest, state, out);
            }
            Some(_) if state.chain_depth == 0 => {
                state.chain_path = None;
                return false;
            }
            _ => {}
        }
        state.chain_depth = depth;
        if depth == 0 && line.ends_with(';') {
            state.chain_path = None;
        }
        true
    }

    fn emit_links(
        &self,
        ctx: &FileContext<'_>,
        index: usize,
        link: &Regex,
        text: &str,
        state: &LineState,
        out: &mut Vec<ApiEndpoint>,
    ) {
        let Some(route) = state.chain_path.as_deref() else {
            return;
        };
        for caps in link.captures_iter(text) {
            let (Some(whole), Some(token)) = (caps.get(0), caps.name("verb")) else {
                continue;
            };
            if let Some(verb) = self.verb_for(token.as_str()) {
                self.emit(ctx, state, index, route, verb.method, &text[whole.end()..], out);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn emit(
        &self,
        ctx: &FileContext<'_>,
        state: &LineState,
        index: usize,
        route: &str,
        http_method: Option<HttpMethod>,
        args: &str,
        out: &mut Vec<ApiEndpoint>,
    ) {
        let mut class_name = state.class_for(&self.spec);
        let mut endpoint =
            ApiEndpoint::new(state.route_path(route), ctx.path, index + 1, ctx.language)
                .with_method(http_method);

        let inline = if self.spec.inline_handler {
            handler_argument(args)
        } else {
            None
        };

        let method_name = match inline {
            Some(reference) => {
                let (owner, name) = split_qualifier(reference);
                if let Some(owner) = owner {
                    class_name = owner.to_string();
                }
                name.to_string()
            }
            None => match self.lookahead(index, ctx.lines) {
                Some(signature) => {
                    endpoint = endpoint.with_signature(signature.parameters, signature.return_type);
                    signature.name
                }
                None => UNKNOWN_HANDLER.to_string(),
            },
        };

        out.push(endpoint.with_handler(class_name, method_name));
    }

    /// Searches at most `window` lines after `index` for a handler signature.
    fn lookahead(&self, index: usize, lines: &[&str]) -> Option<ResolvedSignature> {
        let (pattern, signature) = self.signature.as_ref()?;
        lines
            .iter()
            .skip(index + 1)
            .take(signature.window)
            .filter(|line| !line.is_empty() && !line.starts_with('@') && !self.is_comment(line))
            .find_map(|line| read_signature(pattern, signature.returns, line))
    }

    fn verb_for(&self, token: &str) -> Option<&Verb> {
        self.spec.verbs.iter().find(|v| v.token == token)
    }

    fn receiver_bound(&self, receiver: Option<Match<'_>>, state: &LineState) -> bool {
        match self.spec.receivers {
            Receivers::Any => true,
            Receivers::Bound(_) => {
                receiver.is_some_and(|r| state.receivers.iter().any(|b| b == r.as_str()))
            }
        }
    }
}

/// Longest tokens first so that no token shadows a longer one sharing its prefix.
fn verb_alternation(verbs: &[Verb]) -> String {
    let mut tokens: Vec<&str> = verbs.iter().map(|v| v.token).collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()));
    tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
}

/// True if `token` occurs in `haystack` and is not followed by a word character.
fn contains_token(haystack: &str, token: &str) -> bool {
    haystack.match_indices(token).any(|(i, _)| {
        haystack[i + token.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    })
}

fn parse_tags(list: &str) -> Vec<String> {
    list.split(',')
        .map(|tag| tag.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Bracket depth after `text` when entered at `depth`, plus the offset just
/// past the first point where the depth is zero. Quoted text is ignored.
fn bracket_depth(text: &str, mut depth: usize) -> (usize, Option<usize>) {
    let mut settled_at = (depth == 0).then_some(0);
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && settled_at.is_none() {
                    settled_at = Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }

    (depth, settled_at)
}

/// Text inside the parentheses that directly follow the leading name of
/// `text`, e.g. `value = "/x"` for `@GetMapping(value = "/x") String x()`.
fn leading_arguments(text: &str) -> &str {
    let rest = text
        .trim_start_matches(|c: char| c == '@' || c == '.' || c == '_' || c.is_alphanumeric())
        .trim_start();
    let Some(inner) = rest.strip_prefix('(') else {
        return "";
    };
    let (_, close) = split_arguments(inner, false);
    &inner[..close.unwrap_or(inner.len())]
}

/// Splits `text` on top-level commas up to the first unbalanced closing
/// bracket. Returns the trimmed pieces and the byte offset of that bracket.
fn split_arguments(text: &str, angles: bool) -> (Vec<&str>, Option<usize>) {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut angle = 0usize;
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                if depth == 0 {
                    pieces.push(text[start..i].trim());
                    return (pieces, Some(i));
                }
                depth -= 1;
            }
            '<' if angles => angle += 1,
            '>' if angles => angle = angle.saturating_sub(1),
            ',' if depth == 0 && angle == 0 => {
                pieces.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    pieces.push(text[start..].trim());
    (pieces, None)
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// `name` or `owner.name` with every segment an identifier.
fn is_reference(text: &str) -> bool {
    !text.is_empty() && text.split('.').all(is_identifier)
}

/// Picks the handler reference out of a route call's trailing arguments.
///
/// The last argument wins (earlier ones are middleware). A single wrapper
/// call such as `asyncHandler(ctrl.list)` is looked through. Inline
/// closures yield `None`.
fn handler_argument(args: &str) -> Option<&str> {
    let (pieces, _) = split_arguments(args, false);
    let last = pieces.into_iter().rev().find(|p| !p.is_empty())?;

    if is_reference(last) {
        return Some(last);
    }
    let open = last.find('(')?;
    let inner = last.strip_suffix(')')?.get(open + 1..)?.trim();
    (is_reference(&last[..open]) && is_reference(inner)).then_some(inner)
}

/// Splits `owner.name` into its last owner segment and the name.
/// `this` and `self` owners are dropped.
fn split_qualifier(reference: &str) -> (Option<&str>, &str) {
    match reference.rsplit_once('.') {
        Some((qualifier, name)) => {
            let owner = qualifier.rsplit('.').next().unwrap_or(qualifier);
            if matches!(owner, "this" | "self") {
                (None, name)
            } else {
                (Some(owner), name)
            }
        }
        None => (None, reference),
    }
}

fn read_signature(pattern: &Regex, returns: ReturnStyle, line: &str) -> Option<ResolvedSignature> {
    let caps = pattern.captures(line)?;
    let name = caps.name("name")?;
    let open = name.end() + line[name.end()..].find('(')?;
    let inner = &line[open + 1..];

    let (pieces, close) = split_arguments(inner, true);
    let parameters = pieces
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    let after = close.map(|c| &inner[c + 1..]);

    let return_type = match returns {
        ReturnStyle::BeforeName => caps.name("ret").map(|m| m.as_str().trim().to_string()),
        ReturnStyle::Arrow => after
            .and_then(|rest| rest.trim_start().strip_prefix("->"))
            .map(|rest| rest.trim().trim_end_matches(':').trim().to_string()),
        ReturnStyle::Colon => after
            .and_then(|rest| rest.trim_start().strip_prefix(':'))
            .and_then(|rest| rest.split('{').next())
            .map(|rest| rest.trim().trim_end_matches(';').trim().to_string()),
    }
    .filter(|r| !r.is_empty());

    Some(ResolvedSignature {
        name: name.as_str().to_string(),
        parameters,
        return_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOY: EcosystemSpec = EcosystemSpec {
        name: "Toy",
        project_type: ProjectType::Gin,
        language: Some(Language::Go),
        comment_prefixes: &["//"],
        marker_prefix: ".",
        marker_suffix: "(",
        verbs: &[
            Verb::new("GET", Some(HttpMethod::Get)),
            Verb::new("POST", Some(HttpMethod::Post)),
        ],
        verb_pattern: r#"(?P<recv>\w+)\.(?P<verb>{verbs})\(\s*"(?P<path>[^"]*)"\s*,"#,
        receivers: Receivers::Bound(&["r"]),
        method_override: None,
        named_path: None,
        controller_markers: &[],
        class_pattern: None,
        prefix_pattern: None,
        prefix_scope: PrefixScope::Anywhere,
        bindings: &[r"(\w+)\s*:=\s*router\(\)"],
        group: Some(Group {
            open: r#"\.Group\(\s*"([^"]*)""#,
            close: "}",
        }),
        tags_pattern: None,
        chain: None,
        inline_handler: true,
        signature: Some(Signature {
            pattern: r"^func\s+(?P<name>\w+)\s*\(",
            window: 3,
            returns: ReturnStyle::Colon,
        }),
        default_class: "main",
    };

    fn parse(content: &str) -> Vec<ApiEndpoint> {
        LineEngine::new(TOY)
            .unwrap()
            .parse_file(content, Path::new("toy.go"))
    }

    #[test]
    fn test_group_ends_at_first_close_token() {
        let endpoints = parse(
            r#"
            g := r.Group("/v1")
            {
                r.GET("/a", a)
                if ok { x() }
                r.GET("/b", b)
            }
            "#,
        );
        let paths: Vec<_> = endpoints.iter().map(|e| e.api_path.as_str()).collect();
        assert_eq!(paths, ["/v1/a", "/b"]);
    }

    #[test]
    fn test_unbound_receiver_is_ignored_until_bound() {
        let endpoints = parse(
            r#"
            api.GET("/skipped", h)
            api := router()
            api.POST("/kept", h)
            "#,
        );
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].api_path, "/kept");
        assert_eq!(endpoints[0].http_method, Some(HttpMethod::Post));
        assert_eq!(endpoints[0].line_number, 4);
    }

    #[test]
    fn test_lookahead_is_bounded() {
        let near = parse("r.GET(\"/a\", func(c) {\n\n\nfunc handleA(c)");
        assert_eq!(near[0].method_name, "handleA");

        let far = parse("r.GET(\"/a\", func(c) {\n\n\n\nfunc handleA(c)");
        assert_eq!(far[0].method_name, UNKNOWN_HANDLER);
    }

    #[test]
    fn test_commented_routes_are_skipped() {
        assert!(parse(r#"// r.GET("/old", h)"#).is_empty());
    }

    #[test]
    fn test_gate_accepts_everything_the_parser_accepts() {
        let engine = LineEngine::new(TOY).unwrap();
        let content = "r.GET(\"/a\", h)";
        assert!(!engine.parse_file(content, Path::new("x.go")).is_empty());
        assert!(engine.is_valid_file(content));
        assert!(!engine.is_valid_file("nothing to see"));
    }

    #[test]
    fn test_invalid_template_is_reported() {
        let broken = EcosystemSpec {
            verb_pattern: "(unclosed",
            ..TOY
        };
        assert!(matches!(
            LineEngine::new(broken),
            Err(ScanError::Pattern { ecosystem: "Toy", .. })
        ));
    }

    #[test]
    fn test_handler_argument() {
        assert_eq!(handler_argument(" handler)"), Some("handler"));
        assert_eq!(handler_argument(" auth, users.list)"), Some("users.list"));
        assert_eq!(handler_argument(" asyncHandler(ctrl.create))"), Some("ctrl.create"));
        assert_eq!(handler_argument(" (req, res) => {"), None);
        assert_eq!(handler_argument(" func(c *gin.Context) {"), None);
    }

    #[test]
    fn test_split_qualifier() {
        assert_eq!(split_qualifier("h.List"), (Some("h"), "List"));
        assert_eq!(split_qualifier("api.users.Get"), (Some("users"), "Get"));
        assert_eq!(split_qualifier("this.list"), (None, "list"));
        assert_eq!(split_qualifier("plain"), (None, "plain"));
    }

    #[test]
    fn test_bracket_depth_reports_where_it_settles() {
        assert_eq!(bracket_depth(".get((req, res) => {", 0), (2, Some(0)));
        assert_eq!(bracket_depth("}).post(h)", 2), (0, Some(2)));
        assert_eq!(bracket_depth("res.send(':)')", 2), (2, None));
    }

    #[test]
    fn test_split_arguments_respects_nesting() {
        let (pieces, close) = split_arguments("a, f(b, c), \"x,y\") rest", false);
        assert_eq!(pieces, ["a", "f(b, c)", "\"x,y\""]);
        assert_eq!(close, Some(17));

        let (generic, _) = split_arguments("Map<String, Object> body, int n)", true);
        assert_eq!(generic, ["Map<String, Object> body", "int n"]);
    }

    #[test]
    fn test_leading_arguments_stop_at_own_parenthesis() {
        let annotated = r#"@GetMapping(value = "/x") String x(@RequestParam(value = "q") q)"#;
        assert_eq!(leading_arguments(annotated), r#"value = "/x""#);
        assert_eq!(leading_arguments("r.GET(\"/a\", h)"), "\"/a\", h");
        let bare = "@GetMapping String x(@RequestParam(value = \"q\") q)";
        assert_eq!(leading_arguments(bare), "");
    }

    #[test]
    fn test_contains_token() {
        assert!(contains_token("@RestController", "@RestController"));
        assert!(contains_token("@Controller(\"x\")", "@Controller"));
        assert!(!contains_token("@ControllerAdvice", "@Controller"));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(r#""users", 'admin' "#), ["users", "admin"]);
        assert!(parse_tags("").is_empty());
    }
}
