//! Parser front-end: permissive swc configuration and error conversion.

use crate::*;
use swc_common::{BytePos, FileName, SourceMap, Spanned, input::StringInput, sync::Lrc};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{
    EsSyntax, Lexer, Parser, Syntax,
    error::{Error, SyntaxError},
};

/// A parsed module and where its source starts in span space.
pub struct Parsed {
    pub module: Module,
    pub base: BytePos,
}

/// Module goal plus the proposal syntax swc knows about, so snippets using
/// proposals still produce a tree.
pub fn syntax(opts: &AnalyzerOpts) -> Syntax {
    Syntax::Es(EsSyntax {
        jsx: opts.jsx,
        fn_bind: true,
        decorators: true,
        decorators_before_export: true,
        export_default_from: true,
        import_attributes: true,
        allow_super_outside_method: true,
        allow_return_outside_function: true,
        auto_accessors: true,
        explicit_resource_management: true,
    })
}

/// Strict-mode early errors. Module goal makes every snippet strict, but
/// sloppy script code still has a complete tree worth classifying.
fn is_strict_mode_only(kind: &SyntaxError) -> bool {
    matches!(
        kind,
        SyntaxError::LegacyOctal
            | SyntaxError::LegacyDecimal
            | SyntaxError::WithInStrict
            | SyntaxError::EvalAndArgumentsInStrict
            | SyntaxError::InvalidIdentInStrict(_)
    )
}

fn to_error(lines: &SourceLines, base: BytePos, e: &Error) -> AnalysisError {
    let offset = e.span().lo.0.saturating_sub(base.0) as usize;
    let (line, column) = lines.position(offset);
    AnalysisError::Parse {
        message: e.kind().msg().into_owned(),
        line,
        column,
    }
}

/// Parses `lines.text()` as a module. The text must not start with a byte
/// order mark: swc drops it without shifting spans.
///
/// Any diagnostic fails the parse, including ones swc recovers from (an
/// unclosed block still yields a tree), except strict-mode early errors,
/// which are logged and skipped.
pub fn parse(lines: &SourceLines, opts: &AnalyzerOpts) -> Result<Parsed> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Custom("snippet.js".into())),
        lines.text().to_owned(),
    );
    let lexer = Lexer::new(
        syntax(opts),
        EsVersion::EsNext,
        StringInput::from(&*fm),
        None,
    );
    let mut parser = Parser::new_from(lexer);
    let base = fm.start_pos;
    let module = parser.parse_module().map_err(|e| {
        let err = to_error(lines, base, &e);
        debug!(%err, "parse failed");
        err
    })?;
    for e in parser.take_errors() {
        if is_strict_mode_only(e.kind()) {
            trace!(message = %e.kind().msg(), "ignoring strict-mode error");
            continue;
        }
        let err = to_error(lines, base, &e);
        debug!(%err, "parse failed after recovery");
        return Err(err);
    }
    return Ok(Parsed { module, base });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_str(src: &str) -> Result<Parsed> {
        parse(&SourceLines::new(src), &AnalyzerOpts::default())
    }

    /// The first diagnostic swc itself reports for `src`.
    fn swc_diagnostic(src: &str) -> Option<String> {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(Lrc::new(FileName::Anon), src.to_owned());
        let lexer = Lexer::new(
            syntax(&AnalyzerOpts::default()),
            EsVersion::EsNext,
            StringInput::from(&*fm),
            None,
        );
        let mut parser = Parser::new_from(lexer);
        let fatal = parser.parse_module().err();
        fatal
            .into_iter()
            .chain(parser.take_errors())
            .next()
            .map(|e| e.kind().msg().into_owned())
    }

    #[test]
    fn permissive_goal() {
        assert!(parse_str("return 1;").is_ok());
        assert!(parse_str("await g();").is_ok());
        assert!(parse_str("import x from 'y'; export default x;").is_ok());
        assert!(parse_str("@dec class A {}").is_ok());
        assert!(parse_str("class A { accessor x = 1; }").is_ok());
        assert!(parse_str("import j from './a.json' with { type: 'json' };").is_ok());
        assert!(parse_str("{ using r = f(); }").is_ok());
        assert!(parse_str("async function f() { await using r = g(); }").is_ok());
    }

    #[test]
    fn sloppy_code_is_accepted() {
        assert!(parse_str("var a = 010;").is_ok());
        assert!(parse_str("with (o) { a; }").is_ok());
    }

    #[test]
    fn fatal_error_reports_position() {
        let Err(AnalysisError::Parse { message, line, .. }) = parse_str("let a = 1;\nfunction f() {")
        else {
            panic!("expected a parse error");
        };
        assert!(!message.is_empty());
        assert!((1..=2).contains(&line));
    }

    #[test]
    fn unclosed_blocks_fail() {
        for src in ["function f() {", "if (x) {", "{", "function f() {\n  const x = 1;\n"] {
            assert!(parse_str(src).is_err(), "{src:?} parsed");
        }
    }

    #[test]
    fn message_is_the_parser_diagnostic() {
        for src in ["let a = ;", "function f() {", "a b c"] {
            let Err(AnalysisError::Parse { message, .. }) = parse_str(src) else {
                panic!("{src:?} parsed");
            };
            assert_eq!(Some(message), swc_diagnostic(src));
        }
    }

    #[test]
    fn jsx_is_opt_in() {
        assert!(parse_str("const el = <div />;").is_err());
        let mut opts = AnalyzerOpts::default();
        opts.jsx = true;
        assert!(parse(&SourceLines::new("const el = <div />;"), &opts).is_ok());
    }
}
