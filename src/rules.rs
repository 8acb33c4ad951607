//! Node-shape rules. Each function looks at one kind of node and returns the
//! feature keys it matches together with the span to cite as evidence.
//!
//! Name based matches are table driven. Method names that several built-in
//! types share map to every candidate: without type information the receiver
//! of `x.at(0)` may be an array, a string or a typed array, so all three are
//! reported.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, AssignExpr, AssignOp, BinExpr, BinaryOp, CatchClause, Class, ClassMember,
    Constructor, Expr, ExprOrSpread, Function, Lit, MemberExpr, MemberProp, MetaPropExpr,
    MetaPropKind, NewExpr, ObjectPat, ObjectPatProp, OptChainBase, ParamOrTsParamProp, Pat, Prop,
    PropName, Regex, TaggedTpl, Tpl, VarDecl, VarDeclKind,
};

pub type Hit = (&'static str, Span);

/// `new X(...)` targets.
pub const CONSTRUCTORS: &[(&str, &str)] = &[
    ("Promise", "promises"),
    ("Map", "map"),
    ("Set", "set"),
    ("WeakMap", "weakmap"),
    ("WeakSet", "weakset"),
    ("Proxy", "proxy"),
    ("WeakRef", "weakref"),
    ("FinalizationRegistry", "finalization-registry"),
    ("AggregateError", "aggregate-error"),
    ("SharedArrayBuffer", "shared-array-buffer"),
    ("ArrayBuffer", "typed-arrays"),
    ("DataView", "typed-arrays"),
    ("Int8Array", "typed-arrays"),
    ("Uint8Array", "typed-arrays"),
    ("Uint8ClampedArray", "typed-arrays"),
    ("Int16Array", "typed-arrays"),
    ("Uint16Array", "typed-arrays"),
    ("Int32Array", "typed-arrays"),
    ("Uint32Array", "typed-arrays"),
    ("Float32Array", "typed-arrays"),
    ("Float64Array", "typed-arrays"),
    ("BigInt64Array", "typed-arrays"),
    ("BigUint64Array", "typed-arrays"),
];

/// Constructors accepting `{ cause }` as their second argument.
pub const ERROR_CONSTRUCTORS: &[&str] = &[
    "Error",
    "EvalError",
    "RangeError",
    "ReferenceError",
    "SyntaxError",
    "TypeError",
    "URIError",
];

/// `Namespace.method(...)` calls on built-in namespaces.
pub const STATIC_METHODS: &[(&str, &[&str], &str)] = &[
    ("Object", &["assign"], "object-assign"),
    ("Object", &["entries", "values"], "object-entries-values"),
    ("Object", &["fromEntries"], "object-from-entries"),
    (
        "Object",
        &["getOwnPropertyDescriptors"],
        "object-get-own-property-descriptors",
    ),
    ("Object", &["hasOwn"], "object-has-own"),
    ("Object", &["groupBy"], "array-grouping"),
    ("Map", &["groupBy"], "array-grouping"),
    ("Array", &["from"], "array-from"),
    ("Array", &["of"], "array-of"),
    ("Array", &["fromAsync"], "array-from-async"),
    ("Promise", &["all", "race", "resolve", "reject"], "promises"),
    ("Promise", &["allSettled"], "promise-all-settled"),
    ("Promise", &["any"], "promise-any"),
    ("Promise", &["withResolvers"], "promise-with-resolvers"),
    (
        "Number",
        &[
            "isInteger",
            "isSafeInteger",
            "isFinite",
            "isNaN",
            "parseFloat",
            "parseInt",
        ],
        "number-methods",
    ),
    (
        "Math",
        &[
            "trunc", "sign", "cbrt", "log2", "log10", "log1p", "expm1", "hypot", "imul",
            "fround", "clz32", "sinh", "cosh", "tanh", "asinh", "acosh", "atanh",
        ],
        "math-methods",
    ),
    ("String", &["raw"], "string-raw"),
];

/// `receiver.method(...)` calls where the receiver is unknown.
pub const INSTANCE_METHODS: &[(&str, &[&str])] = &[
    ("includes", &["array-includes", "string-includes"]),
    ("at", &["array-at", "string-at", "typed-array-at"]),
    ("with", &["array-with", "typed-array-with"]),
    ("flat", &["array-flat"]),
    ("flatMap", &["array-flat"]),
    ("findLast", &["array-find-last"]),
    ("findLastIndex", &["array-find-last"]),
    ("toSorted", &["array-change-by-copy"]),
    ("toReversed", &["array-change-by-copy"]),
    ("toSpliced", &["array-change-by-copy"]),
    ("find", &["array-find"]),
    ("findIndex", &["array-find"]),
    ("fill", &["array-fill"]),
    ("padStart", &["string-padding"]),
    ("padEnd", &["string-padding"]),
    ("trimStart", &["string-trim-start-end"]),
    ("trimEnd", &["string-trim-start-end"]),
    ("replaceAll", &["string-replace-all"]),
    ("matchAll", &["string-match-all"]),
    ("startsWith", &["string-starts-ends-with"]),
    ("endsWith", &["string-starts-ends-with"]),
    ("repeat", &["string-repeat"]),
    ("isWellFormed", &["string-well-formed"]),
    ("toWellFormed", &["string-well-formed"]),
    ("finally", &["promise-finally"]),
    ("union", &["set-methods"]),
    ("intersection", &["set-methods"]),
    ("difference", &["set-methods"]),
    ("symmetricDifference", &["set-methods"]),
    ("isSubsetOf", &["set-methods"]),
    ("isSupersetOf", &["set-methods"]),
    ("isDisjointFrom", &["set-methods"]),
];

/// Bare identifier references to built-in globals.
pub const GLOBALS: &[(&str, &str)] = &[
    ("globalThis", "globalthis"),
    ("structuredClone", "structured-clone"),
    ("Symbol", "symbol"),
    ("Reflect", "reflect"),
    ("BigInt", "bigint"),
];

/// Regex flags introduced after ES5.
pub const REGEX_FLAGS: &[(char, &str)] = &[
    ('s', "regex-dotall"),
    ('y', "regex-sticky"),
    ('u', "regex-unicode"),
    ('d', "regex-match-indices"),
    ('v', "regex-unicode-sets"),
];

fn table_get(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table.iter().find(|(n, _)| *n == name).map(|(_, k)| *k)
}

/// Unwraps `a.b`, `a?.b` and `(a.b)` to the member access.
pub fn member_of(e: &Expr) -> Option<&MemberExpr> {
    match e {
        Expr::Member(m) => Some(m),
        Expr::OptChain(o) => match &*o.base {
            OptChainBase::Member(m) => Some(m),
            _ => None,
        },
        Expr::Paren(p) => member_of(&p.expr),
        _ => None,
    }
}

/// Static name of a member property: `a.b` and `a["b"]`.
pub fn prop_name(prop: &MemberProp) -> Option<&str> {
    match prop {
        MemberProp::Ident(i) => Some(&*i.sym),
        MemberProp::Computed(c) => match &*c.expr {
            Expr::Lit(Lit::Str(s)) => Some(s.value.as_str()),
            _ => None,
        },
        MemberProp::PrivateName(_) => None,
    }
}

/// Default and rest parameters in a parameter list.
pub fn params<'p>(pats: impl IntoIterator<Item = &'p Pat>) -> Vec<Hit> {
    pats.into_iter()
        .filter_map(|p| match p {
            Pat::Assign(a) => Some(("default-parameters", a.span)),
            Pat::Rest(r) => Some(("rest-parameters", r.span)),
            _ => None,
        })
        .collect()
}

fn flags(span: Span, is_async: bool, is_generator: bool) -> Vec<Hit> {
    let mut hits = vec![];
    if is_generator {
        hits.push(("generators", span));
    }
    if is_async {
        hits.push(("async-functions", span));
    }
    if is_async && is_generator {
        hits.push(("async-generators", span));
    }
    hits
}

/// Cites only the signature of a function, not its body. The span runs up to
/// the opening brace; the classifier drops the whitespace before it.
pub fn function(f: &Function) -> Vec<Hit> {
    let head = match &f.body {
        Some(body) => f.span.with_hi(body.span.lo),
        None => f.span,
    };
    let mut hits = flags(head, f.is_async, f.is_generator);
    hits.extend(params(f.params.iter().map(|p| &p.pat)));
    hits
}

pub fn arrow(a: &ArrowExpr) -> Vec<Hit> {
    let mut hits = vec![("arrow-functions", a.span)];
    hits.extend(flags(a.span, a.is_async, a.is_generator));
    hits.extend(params(a.params.iter()));
    hits
}

pub fn var_decl(v: &VarDecl) -> Vec<Hit> {
    match v.kind {
        VarDeclKind::Const => vec![("const", v.span)],
        VarDeclKind::Let => vec![("let", v.span)],
        VarDeclKind::Var => vec![],
    }
}

pub fn new_expr(n: &NewExpr) -> Vec<Hit> {
    let Expr::Ident(callee) = &*n.callee else {
        return vec![];
    };
    let mut hits: Vec<Hit> = table_get(CONSTRUCTORS, &callee.sym)
        .map(|k| (k, n.span))
        .into_iter()
        .collect();
    let options_object = n
        .args
        .as_ref()
        .and_then(|args| args.get(1))
        .is_some_and(|a| a.spread.is_none() && a.expr.is_object());
    if options_object && ERROR_CONSTRUCTORS.contains(&&*callee.sym) {
        hits.push(("error-cause", n.span));
    }
    hits
}

/// Classifies a call through a member callee: `Namespace.method()` first,
/// then `receiver.method()`.
pub fn call(callee: &Expr, span: Span) -> Vec<Hit> {
    let Some(m) = member_of(callee) else {
        return vec![];
    };
    let Some(name) = prop_name(&m.prop) else {
        return vec![];
    };
    if let Expr::Ident(ns) = &*m.obj {
        let found: Vec<Hit> = STATIC_METHODS
            .iter()
            .filter(|(n, methods, _)| *n == &*ns.sym && methods.contains(&name))
            .map(|(_, _, k)| (*k, span))
            .collect();
        if !found.is_empty() {
            return found;
        }
    }
    INSTANCE_METHODS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, keys)| keys.iter().map(|k| (*k, span)).collect())
        .unwrap_or_default()
}

pub fn ident_ref(e: &Expr) -> Vec<Hit> {
    match e {
        Expr::Ident(i) => table_get(GLOBALS, &i.sym)
            .map(|k| (k, i.span))
            .into_iter()
            .collect(),
        _ => vec![],
    }
}

pub fn meta_prop(m: &MetaPropExpr) -> Vec<Hit> {
    match m.kind {
        MetaPropKind::NewTarget => vec![("new-target", m.span)],
        MetaPropKind::ImportMeta => vec![("import-meta", m.span)],
    }
}

/// Flag letters and pattern substrings. This is plain substring matching on
/// the raw pattern; an escaped `\p{` inside a class still counts.
pub fn regex(r: &Regex) -> Vec<Hit> {
    let mut hits: Vec<Hit> = vec![];
    for (flag, key) in REGEX_FLAGS {
        if r.flags.contains(*flag) {
            hits.push((*key, r.span));
        }
    }
    let exp: &str = &r.exp;
    if exp.contains("(?<=") || exp.contains("(?<!") {
        hits.push(("regex-lookbehind", r.span));
    }
    if exp
        .match_indices("(?<")
        .any(|(i, _)| !matches!(exp.as_bytes().get(i + 3), Some(b'=' | b'!')))
    {
        hits.push(("regex-named-groups", r.span));
    }
    if exp.contains("\\p{") || exp.contains("\\P{") {
        hits.push(("regex-unicode-property-escapes", r.span));
    }
    hits
}

pub fn lit(l: &Lit) -> Vec<Hit> {
    match l {
        Lit::Regex(r) => regex(r),
        Lit::BigInt(b) => vec![("bigint", b.span)],
        Lit::Num(n) => {
            let Some(raw) = n.raw.as_deref() else {
                return vec![];
            };
            let mut hits = vec![];
            if raw.contains('_') {
                hits.push(("numeric-separators", n.span));
            }
            if ["0b", "0B", "0o", "0O"].iter().any(|p| raw.starts_with(p)) {
                hits.push(("binary-octal-literals", n.span));
            }
            hits
        }
        Lit::Str(s) => match s.raw.as_deref() {
            Some(raw) if raw.contains("\\u{") => vec![("unicode-code-point-escapes", s.span)],
            _ => vec![],
        },
        _ => vec![],
    }
}

pub fn tpl(t: &Tpl) -> Vec<Hit> {
    let mut hits = vec![("template-literals", t.span)];
    hits.extend(
        t.quasis
            .iter()
            .filter(|q| q.raw.contains("\\u{"))
            .map(|q| ("unicode-code-point-escapes", q.span)),
    );
    hits
}

pub fn tagged_tpl(t: &TaggedTpl) -> Vec<Hit> {
    let mut hits = vec![("tagged-templates", t.span)];
    let is_raw = member_of(&t.tag).is_some_and(|m| {
        m.obj.as_ident().is_some_and(|i| i.sym == "String")
            && prop_name(&m.prop) == Some("raw")
    });
    if is_raw {
        hits.push(("string-raw", t.span));
    }
    hits
}

pub fn class(c: &Class) -> Vec<Hit> {
    vec![("classes", c.span)]
}

pub fn class_member(m: &ClassMember) -> Vec<Hit> {
    match m {
        ClassMember::ClassProp(p) if p.is_static => vec![("static-class-fields", p.span)],
        ClassMember::ClassProp(p) => vec![("class-fields", p.span)],
        ClassMember::PrivateProp(p) if p.is_static => vec![
            ("private-class-fields", p.span),
            ("static-class-fields", p.span),
        ],
        ClassMember::PrivateProp(p) => vec![("private-class-fields", p.span)],
        ClassMember::PrivateMethod(p) => vec![("private-methods", p.span)],
        ClassMember::StaticBlock(b) => vec![("class-static-blocks", b.span)],
        _ => vec![],
    }
}

pub fn constructor(c: &Constructor) -> Vec<Hit> {
    params(c.params.iter().filter_map(|p| match p {
        ParamOrTsParamProp::Param(p) => Some(&p.pat),
        _ => None,
    }))
}

pub fn bin(b: &BinExpr) -> Vec<Hit> {
    match b.op {
        BinaryOp::Exp => vec![("exponentiation", b.span)],
        BinaryOp::NullishCoalescing => vec![("nullish-coalescing", b.span)],
        BinaryOp::In if b.left.is_private_name() => vec![("private-in", b.span)],
        _ => vec![],
    }
}

pub fn assign(a: &AssignExpr) -> Vec<Hit> {
    match a.op {
        AssignOp::ExpAssign => vec![("exponentiation", a.span)],
        AssignOp::AndAssign | AssignOp::OrAssign | AssignOp::NullishAssign => {
            vec![("logical-assignment", a.span)]
        }
        _ => vec![],
    }
}

pub fn object_pat(o: &ObjectPat) -> Vec<Hit> {
    let mut hits = vec![("destructuring", o.span)];
    hits.extend(o.props.iter().filter_map(|p| match p {
        ObjectPatProp::Rest(r) => Some(("object-rest-spread", r.span)),
        _ => None,
    }));
    hits
}

pub fn expr_or_spread(e: &ExprOrSpread) -> Vec<Hit> {
    match e.spread {
        Some(_) => vec![("spread-syntax", e.span())],
        None => vec![],
    }
}

pub fn prop(p: &Prop) -> Vec<Hit> {
    match p {
        Prop::Shorthand(i) => vec![("shorthand-properties", i.span)],
        Prop::Method(_) => vec![("method-definitions", p.span())],
        _ => vec![],
    }
}

pub fn prop_name_node(p: &PropName) -> Vec<Hit> {
    match p {
        PropName::Computed(c) => vec![("computed-properties", c.span)],
        _ => vec![],
    }
}

pub fn catch_clause(c: &CatchClause) -> Vec<Hit> {
    match c.param {
        None => vec![("optional-catch-binding", c.span)],
        Some(_) => vec![],
    }
}

/// The `#!` line at the very start of the text, found before parsing.
pub fn hashbang(src: &str) -> Option<std::ops::Range<usize>> {
    if !src.starts_with("#!") {
        return None;
    }
    Some(0..src.find('\n').unwrap_or(src.len()))
}
