//! Walks a parsed module once and records evidence for every rule match.

use crate::*;
use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{
    ArrayPat, ArrowExpr, AssignExpr, AwaitExpr, BinExpr, CallExpr, Callee, CatchClause, Class,
    ClassMember, Constructor, Decorator, Expr, ExprOrSpread, ForOfStmt, Function, GetterProp, Lit,
    MetaPropExpr, ModuleDecl, NewExpr, ObjectPat, OptCall, OptChainExpr, Prop, PropName,
    SetterProp, SpreadElement, StaticBlock, TaggedTpl, Tpl, UsingDecl, VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

/// Evidence gathered by one analysis, keyed by feature.
///
/// Keys remember the order they were first seen in; each key's snippets are a
/// set, so recording the same location twice keeps one copy.
#[derive(Debug, Default, Clone)]
pub struct Detections {
    order: Vec<&'static str>,
    evidence: BTreeMap<&'static str, BTreeSet<CodeSnippet>>,
}
impl Detections {
    /// Returns `false` when the snippet was already recorded for `key`.
    pub fn record(&mut self, key: &'static str, snippet: CodeSnippet) -> bool {
        if !self.evidence.contains_key(key) {
            self.order.push(key);
        }
        self.evidence.entry(key).or_default().insert(snippet)
    }
    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
    pub fn snippets(&self, key: &str) -> Option<&BTreeSet<CodeSnippet>> {
        self.evidence.get(key)
    }
    /// Keys in first-seen order with their evidence.
    pub fn into_entries(mut self) -> impl Iterator<Item = (&'static str, BTreeSet<CodeSnippet>)> {
        take(&mut self.order).into_iter().map(move |key| {
            let snippets = self.evidence.remove(key).unwrap_or_default();
            (key, snippets)
        })
    }
}

pub struct Classifier<'a> {
    lines: &'a SourceLines<'a>,
    /// Span position of the first source byte.
    base: BytePos,
    context_lines: usize,
    /// Number of function boundaries around the node being visited.
    fn_depth: usize,
    pub detections: Detections,
}
impl<'a> Classifier<'a> {
    pub fn new(lines: &'a SourceLines<'a>, base: BytePos, context_lines: usize) -> Self {
        Self {
            lines,
            base,
            context_lines,
            fn_depth: 0,
            detections: Default::default(),
        }
    }
    pub fn record_range(&mut self, key: &'static str, range: std::ops::Range<usize>) {
        let snippet = self
            .lines
            .snippet(range.start, range.end, self.context_lines);
        trace!(key, line = snippet.match_line, column = snippet.match_column, "detected");
        self.detections.record(key, snippet);
    }
    fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.base.0) as usize
    }
    fn record(&mut self, hits: Vec<rules::Hit>) {
        for (key, span) in hits {
            if span.is_dummy() {
                continue;
            }
            let start = self.offset(span.lo);
            let end = self.lines.trim_end(start, self.offset(span.hi));
            self.record_range(key, start..end);
        }
    }
    fn record_one(&mut self, key: &'static str, span: Span) {
        self.record(vec![(key, span)]);
    }
    fn in_function(&mut self, f: impl FnOnce(&mut Self)) {
        self.fn_depth += 1;
        f(self);
        self.fn_depth -= 1;
    }
}

impl Visit for Classifier<'_> {
    fn visit_function(&mut self, node: &Function) {
        self.record(rules::function(node));
        self.in_function(|this| node.visit_children_with(this));
    }
    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.record(rules::arrow(node));
        self.in_function(|this| node.visit_children_with(this));
    }
    fn visit_constructor(&mut self, node: &Constructor) {
        self.record(rules::constructor(node));
        self.in_function(|this| node.visit_children_with(this));
    }
    fn visit_getter_prop(&mut self, node: &GetterProp) {
        self.in_function(|this| node.visit_children_with(this));
    }
    fn visit_setter_prop(&mut self, node: &SetterProp) {
        self.in_function(|this| node.visit_children_with(this));
    }
    fn visit_static_block(&mut self, node: &StaticBlock) {
        self.in_function(|this| node.visit_children_with(this));
    }
    fn visit_var_decl(&mut self, node: &VarDecl) {
        self.record(rules::var_decl(node));
        node.visit_children_with(self);
    }
    fn visit_using_decl(&mut self, node: &UsingDecl) {
        self.record_one("explicit-resource-management", node.span);
        node.visit_children_with(self);
    }
    fn visit_await_expr(&mut self, node: &AwaitExpr) {
        self.record_one("await", node.span);
        if self.fn_depth == 0 {
            self.record_one("top-level-await", node.span);
        }
        node.visit_children_with(self);
    }
    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        let head = node.span.with_hi(node.right.span().hi);
        self.record_one("for-of", head);
        if node.is_await {
            self.record_one("for-await-of", head);
            if self.fn_depth == 0 {
                self.record_one("top-level-await", head);
            }
        }
        node.visit_children_with(self);
    }
    fn visit_new_expr(&mut self, node: &NewExpr) {
        self.record(rules::new_expr(node));
        node.visit_children_with(self);
    }
    fn visit_call_expr(&mut self, node: &CallExpr) {
        match &node.callee {
            Callee::Import(_) => self.record_one("dynamic-import", node.span),
            Callee::Expr(callee) => self.record(rules::call(callee, node.span)),
            Callee::Super(_) => {}
        }
        node.visit_children_with(self);
    }
    fn visit_opt_call(&mut self, node: &OptCall) {
        self.record(rules::call(&node.callee, node.span));
        node.visit_children_with(self);
    }
    fn visit_opt_chain_expr(&mut self, node: &OptChainExpr) {
        if node.optional {
            self.record_one("optional-chaining", node.span);
        }
        node.visit_children_with(self);
    }
    fn visit_expr(&mut self, node: &Expr) {
        self.record(rules::ident_ref(node));
        node.visit_children_with(self);
    }
    fn visit_meta_prop_expr(&mut self, node: &MetaPropExpr) {
        self.record(rules::meta_prop(node));
    }
    fn visit_lit(&mut self, node: &Lit) {
        self.record(rules::lit(node));
        node.visit_children_with(self);
    }
    fn visit_tpl(&mut self, node: &Tpl) {
        self.record(rules::tpl(node));
        node.visit_children_with(self);
    }
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        self.record(rules::tagged_tpl(node));
        node.visit_children_with(self);
    }
    fn visit_class(&mut self, node: &Class) {
        self.record(rules::class(node));
        node.visit_children_with(self);
    }
    fn visit_class_member(&mut self, node: &ClassMember) {
        self.record(rules::class_member(node));
        node.visit_children_with(self);
    }
    fn visit_bin_expr(&mut self, node: &BinExpr) {
        self.record(rules::bin(node));
        node.visit_children_with(self);
    }
    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        self.record(rules::assign(node));
        node.visit_children_with(self);
    }
    fn visit_array_pat(&mut self, node: &ArrayPat) {
        self.record_one("destructuring", node.span);
        node.visit_children_with(self);
    }
    fn visit_object_pat(&mut self, node: &ObjectPat) {
        self.record(rules::object_pat(node));
        node.visit_children_with(self);
    }
    fn visit_expr_or_spread(&mut self, node: &ExprOrSpread) {
        self.record(rules::expr_or_spread(node));
        node.visit_children_with(self);
    }
    fn visit_spread_element(&mut self, node: &SpreadElement) {
        self.record_one("object-rest-spread", node.span());
        node.visit_children_with(self);
    }
    fn visit_prop(&mut self, node: &Prop) {
        self.record(rules::prop(node));
        node.visit_children_with(self);
    }
    fn visit_prop_name(&mut self, node: &PropName) {
        self.record(rules::prop_name_node(node));
        node.visit_children_with(self);
    }
    fn visit_catch_clause(&mut self, node: &CatchClause) {
        self.record(rules::catch_clause(node));
        node.visit_children_with(self);
    }
    fn visit_module_decl(&mut self, node: &ModuleDecl) {
        self.record_one("es-modules", node.span());
        node.visit_children_with(self);
    }
    fn visit_decorator(&mut self, node: &Decorator) {
        self.record_one("decorators", node.span);
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{detection_test, keys, snippets};
    use pretty_assertions::assert_eq;
    use swc_ecma_visit::{VisitMut, VisitMutWith};

    /// Rewrites every bare `x` to `await x`, including where the parser
    /// would not accept `await`.
    struct AwaitX;
    impl VisitMut for AwaitX {
        fn visit_mut_expr(&mut self, e: &mut Expr) {
            e.visit_mut_children_with(self);
            let awaited = match e {
                Expr::Ident(i) if &*i.sym == "x" => Expr::Await(AwaitExpr {
                    span: i.span,
                    arg: Box::new(Expr::Ident(i.clone())),
                }),
                _ => return,
            };
            *e = awaited;
        }
    }

    fn classify_awaited(src: &str) -> Vec<&'static str> {
        let lines = SourceLines::new(src);
        let mut parsed = parse::parse(&lines, &AnalyzerOpts::default()).unwrap();
        parsed.module.visit_mut_with(&mut AwaitX);
        let mut classifier = Classifier::new(&lines, parsed.base, 2);
        parsed.module.visit_with(&mut classifier);
        classifier.detections.keys().collect()
    }

    #[test]
    fn accessors_and_blocks_are_function_boundaries() {
        assert_eq!(classify_awaited("x;"), ["await", "top-level-await"]);
        let k = classify_awaited(
            "({ get a() { x; }, set b(v) { x; } });\nclass C { constructor() { x; } static { x; } get c() { return x; } }",
        );
        assert!(k.contains(&"await"));
        assert!(!k.contains(&"top-level-await"));
    }

    #[test]
    fn detections_are_sets() {
        let mut d = Detections::default();
        let s = snippet::extract("const x = 1;", 0, 12);
        assert!(d.record("const", s.clone()));
        assert!(!d.record("const", s));
        assert_eq!(d.len(), 1);
        assert_eq!(d.snippets("const").map(|s| s.len()), Some(1));
    }

    detection_test!(const_only ["const x = 1;"] => |r| {
        assert_eq!(keys(&r), ["const"]);
        assert_eq!(r.summary.total_features, 1);
    });

    detection_test!(let_and_var ["let a = 1; var b = 2;"] => |r| assert_eq!(keys(&r), ["let"]));

    detection_test!(await_inside_function ["async function f() { await g(); }"] => |r| {
        assert_eq!(keys(&r), ["async-functions", "await"]);
    });

    detection_test!(await_at_top_level ["await g();"] => |r| {
        assert_eq!(keys(&r), ["await", "top-level-await"]);
    });

    detection_test!(await_inside_arrow ["const f = async () => { await g(); };"] => |r| {
        assert!(!keys(&r).contains(&"top-level-await"));
        assert!(keys(&r).contains(&"arrow-functions"));
    });

    detection_test!(for_await_top_level ["for await (const x of xs) {}"] => |r| {
        let k = keys(&r);
        assert!(k.contains(&"for-await-of"));
        assert!(k.contains(&"top-level-await"));
        assert!(k.contains(&"for-of"));
    });

    detection_test!(for_await_inside_async_function ["async function f() { for await (const v of xs) {} }"] => |r| {
        let k = keys(&r);
        assert!(k.contains(&"for-await-of"));
        assert!(!k.contains(&"top-level-await"));
    });

    detection_test!(using_declarations ["{ using r = f(); }\nasync function g() { await using s = h(); }"] => |r| {
        let found = snippets(&r, "explicit-resource-management");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].match_line, 1);
        assert_eq!(found[1].match_line, 2);
    });

    detection_test!(auto_accessors_parse ["class A { accessor x = 1; }"] => |r| {
        assert_eq!(keys(&r), ["classes"]);
    });

    detection_test!(byte_order_mark_is_skipped ["\u{feff}const x = 1;"] => |r| {
        let s = &snippets(&r, "const")[0];
        assert_eq!(s.match_text, "const x = 1;");
        assert_eq!(s.match_column, 0);
        assert_eq!(s.context_text, "const x = 1;");
    });

    detection_test!(code_point_escapes_in_templates ["`\\u{1F600}`"] => |r| {
        assert_eq!(keys(&r), ["template-literals", "unicode-code-point-escapes"]);
        assert!(snippets(&r, "unicode-code-point-escapes")[0].match_text.contains("\\u{1F600}"));
    });

    detection_test!(relative_indexing_is_ambiguous ["arr.at(0)"] => |r| {
        assert_eq!(keys(&r), ["array-at", "string-at", "typed-array-at"]);
        assert_eq!(snippets(&r, "array-at")[0].match_text, "arr.at(0)");
    });

    detection_test!(optional_call_method ["arr?.includes(1)"] => |r| {
        let k = keys(&r);
        assert!(k.contains(&"optional-chaining"));
        assert!(k.contains(&"array-includes"));
        assert!(k.contains(&"string-includes"));
    });

    detection_test!(with_method ["xs.with(0, 1)"] => |r| {
        assert_eq!(keys(&r), ["array-with", "typed-array-with"]);
    });

    detection_test!(static_methods_win ["Object.entries(o); Array.from(s); Promise.any(ps);"] => |r| {
        assert_eq!(keys(&r), ["object-entries-values", "array-from", "promise-any"]);
    });

    detection_test!(constructors ["new Map(); new WeakRef(o); new Foo();"] => |r| {
        assert_eq!(keys(&r), ["map", "weakref"]);
    });

    detection_test!(error_cause ["throw new Error('x', { cause: e });"] => |r| {
        assert_eq!(keys(&r), ["error-cause"]);
    });

    detection_test!(error_cause_heuristic ["new TypeError('x', {})"] => |r| {
        assert_eq!(keys(&r), ["error-cause"]);
    });

    detection_test!(error_without_options ["new Error('x', e)"] => |r| assert!(keys(&r).is_empty()));

    detection_test!(function_flags ["function* g(a = 1, ...rest) {} async function* h() {}"] => |r| {
        assert_eq!(
            keys(&r),
            ["generators", "default-parameters", "rest-parameters", "async-functions", "async-generators"]
        );
        assert_eq!(snippets(&r, "generators")[0].match_text, "function* g(a = 1, ...rest)");
        assert_eq!(snippets(&r, "async-generators")[0].match_text, "async function* h()");
    });

    detection_test!(regex_features [r"/(?<year>\d+)(?<=x)\p{L}/suyd"] => |r| {
        let mut k = keys(&r);
        k.sort();
        assert_eq!(
            k,
            [
                "regex-dotall",
                "regex-lookbehind",
                "regex-match-indices",
                "regex-named-groups",
                "regex-sticky",
                "regex-unicode",
                "regex-unicode-property-escapes",
            ]
        );
    });

    detection_test!(lookbehind_is_not_a_named_group [r"/(?<!a)b/"] => |r| {
        assert_eq!(keys(&r), ["regex-lookbehind"]);
    });

    detection_test!(hashbang ["#!/usr/bin/env node\nvar x = 1;"] => |r| {
        assert_eq!(keys(&r), ["hashbang"]);
        assert_eq!(snippets(&r, "hashbang")[0].match_text, "#!/usr/bin/env node");
    });

    detection_test!(class_members ["class A { a = 1; static b = 2; #c; #m() {} static { } has(o) { return #c in o; } }"] => |r| {
        let k = keys(&r);
        for key in [
            "classes",
            "class-fields",
            "static-class-fields",
            "private-class-fields",
            "private-methods",
            "class-static-blocks",
            "private-in",
        ] {
            assert!(k.contains(&key), "missing {key}");
        }
    });

    detection_test!(operators ["a ** b; a ??= b; a ?? b; a?.b; x ||= 1;"] => |r| {
        assert_eq!(
            keys(&r),
            ["exponentiation", "logical-assignment", "nullish-coalescing", "optional-chaining"]
        );
    });

    detection_test!(objects_and_patterns ["var { a, ...rest } = o; var [x] = y; var z = { a, [k]: 1, m() {}, ...o }; f(...args);"] => |r| {
        let k = keys(&r);
        for key in [
            "destructuring",
            "object-rest-spread",
            "shorthand-properties",
            "computed-properties",
            "method-definitions",
            "spread-syntax",
        ] {
            assert!(k.contains(&key), "missing {key}");
        }
    });

    detection_test!(literals ["var a = 1_000, b = 0b11, c = 10n, d = '\\u{1F600}', e = `t${a}`, f = String.raw`x`;"] => |r| {
        let k = keys(&r);
        for key in [
            "numeric-separators",
            "binary-octal-literals",
            "bigint",
            "unicode-code-point-escapes",
            "template-literals",
            "tagged-templates",
            "string-raw",
        ] {
            assert!(k.contains(&key), "missing {key}");
        }
    });

    detection_test!(modules ["import x from 'y'; export const z = import.meta.url; import('w');"] => |r| {
        let k = keys(&r);
        for key in ["es-modules", "const", "import-meta", "dynamic-import"] {
            assert!(k.contains(&key), "missing {key}");
        }
    });

    detection_test!(globals_and_misc ["try {} catch {} globalThis.x = Symbol('s'); structuredClone(o); function F() { return new.target; }"] => |r| {
        let k = keys(&r);
        for key in ["optional-catch-binding", "globalthis", "symbol", "structured-clone", "new-target"] {
            assert!(k.contains(&key), "missing {key}");
        }
    });

    detection_test!(each_location_is_kept ["arr.at(0); arr.at(0);"] => |r| {
        assert_eq!(snippets(&r, "array-at").len(), 2);
    });
}
