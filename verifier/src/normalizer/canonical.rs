//! Canonical-form rendering of parsed programs.
//!
//! A program is parsed with `rustpython-parser` and rendered into a
//! deterministic s-expression string; two fragments are structurally
//! equivalent exactly when their canonical strings are equal. Three
//! canonicalization rules apply, each independently toggleable through
//! [`AstOptions`]:
//!
//! - **Local-binding alpha-renaming**: identifiers bound by a loop target,
//!   function/lambda parameter (including `*args`/`**kwargs`), or
//!   comprehension target become positional placeholders `_v0, _v1, …` in
//!   left-to-right, outer-to-inner order of first binding. Globals,
//!   builtins, function names, and attribute names are left unchanged;
//!   nested scopes receive strictly increasing indices so shadowing stays
//!   distinguishable. Only provably lexically-scoped bindings are renamed —
//!   assignment targets, `with … as` names, walrus targets, and exception
//!   names are left untouched.
//! - **Slice normalization**: a bound equal to the identity value for its
//!   position (`lower=0`, `step=1`, or an explicit `None`) is rewritten to
//!   the omitted form, so `x[0:3]`, `x[:3]`, and `x[0:3:1]` canonicalize
//!   identically while `x[3:]` stays distinct from `x[:3]`.
//! - **Docstring stripping**: a single leading string-expression statement
//!   at module, function, or class level is removed.

use rustpython_parser::{Parse, ast};
use std::collections::HashMap;

/// Canonicalization toggles. All rules are on by default.
#[derive(Debug, Clone)]
pub struct AstOptions {
    pub rename_locals: bool,
    pub normalize_slices: bool,
    pub ignore_docstrings: bool,
}

impl Default for AstOptions {
    fn default() -> Self {
        AstOptions {
            rename_locals: true,
            normalize_slices: true,
            ignore_docstrings: true,
        }
    }
}

/// The source would not parse (or uses a form this canonicalizer does not
/// render). For submissions this is a learner fault, never an
/// infrastructure one.
#[derive(Debug, Clone)]
pub struct ParseFailure(pub String);

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse `source` and render its canonical form.
pub fn canonical_form(source: &str, options: &AstOptions) -> Result<String, ParseFailure> {
    let suite = ast::Suite::parse(source, "<fragment>")
        .map_err(|err| ParseFailure(err.to_string()))?;
    let mut canonicalizer = Canonicalizer::new(options);
    let body = canonicalizer.body(&suite, true)?;
    Ok(format!("(module {body})"))
}

#[derive(Debug, Clone, Copy)]
enum SliceBound {
    Lower,
    Upper,
    Step,
}

struct Canonicalizer<'a> {
    options: &'a AstOptions,
    /// Innermost scope last. The root scope holds module-level loop targets.
    scopes: Vec<HashMap<String, String>>,
    next_binding: usize,
}

impl<'a> Canonicalizer<'a> {
    fn new(options: &'a AstOptions) -> Self {
        Canonicalizer {
            options,
            scopes: vec![HashMap::new()],
            next_binding: 0,
        }
    }

    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Record a renameable binding in the innermost scope and return the
    /// name it will render as. The counter never decreases, so later
    /// bindings in inner scopes stay distinguishable from the ones they
    /// shadow.
    fn bind(&mut self, name: &str) -> String {
        if !self.options.rename_locals {
            return name.to_string();
        }
        let placeholder = format!("_v{}", self.next_binding);
        self.next_binding += 1;
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), placeholder.clone());
        }
        placeholder
    }

    fn rename(&self, name: &str) -> String {
        for scope in self.scopes.iter().rev() {
            if let Some(placeholder) = scope.get(name) {
                return placeholder.clone();
            }
        }
        name.to_string()
    }

    /// Bind every name inside a loop/comprehension target, including tuple
    /// and starred unpacking. Attribute/subscript targets are not lexical
    /// bindings and stay untouched.
    fn bind_target(&mut self, target: &ast::Expr) {
        match target {
            ast::Expr::Name(name) => {
                self.bind(name.id.as_str());
            }
            ast::Expr::Tuple(tuple) => {
                for elt in &tuple.elts {
                    self.bind_target(elt);
                }
            }
            ast::Expr::List(list) => {
                for elt in &list.elts {
                    self.bind_target(elt);
                }
            }
            ast::Expr::Starred(starred) => self.bind_target(&starred.value),
            _ => {}
        }
    }

    fn body(&mut self, body: &[ast::Stmt], strip_docstring: bool) -> Result<String, ParseFailure> {
        let mut stmts = body;
        if strip_docstring && self.options.ignore_docstrings {
            if let Some(first) = stmts.first() {
                if is_docstring(first) {
                    stmts = &stmts[1..];
                }
            }
        }
        let mut rendered = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            rendered.push(self.stmt(stmt)?);
        }
        Ok(rendered.join(" "))
    }

    fn stmt(&mut self, stmt: &ast::Stmt) -> Result<String, ParseFailure> {
        Ok(match stmt {
            ast::Stmt::FunctionDef(def) => self.function(
                "def",
                def.name.as_str(),
                &def.args,
                &def.body,
                &def.decorator_list,
                def.returns.as_deref(),
            )?,
            ast::Stmt::AsyncFunctionDef(def) => self.function(
                "async-def",
                def.name.as_str(),
                &def.args,
                &def.body,
                &def.decorator_list,
                def.returns.as_deref(),
            )?,
            ast::Stmt::ClassDef(def) => {
                let decorators = self.exprs(&def.decorator_list)?;
                let bases = self.exprs(&def.bases)?;
                let keywords = self.keywords(&def.keywords)?;
                self.push_scope();
                let body = self.body(&def.body, true)?;
                self.pop_scope();
                format!(
                    "(class name={} bases=[{bases}] keywords=[{keywords}] decorators=[{decorators}] body=[{body}])",
                    def.name.as_str()
                )
            }
            ast::Stmt::Return(s) => format!("(return {})", self.opt_expr(s.value.as_deref())?),
            ast::Stmt::Delete(s) => format!("(delete [{}])", self.exprs(&s.targets)?),
            ast::Stmt::Assign(s) => format!(
                "(assign targets=[{}] value={})",
                self.exprs(&s.targets)?,
                self.expr(&s.value)?
            ),
            ast::Stmt::AugAssign(s) => format!(
                "(augassign target={} op={:?} value={})",
                self.expr(&s.target)?,
                s.op,
                self.expr(&s.value)?
            ),
            ast::Stmt::AnnAssign(s) => format!(
                "(annassign target={} ann={} value={})",
                self.expr(&s.target)?,
                self.expr(&s.annotation)?,
                self.opt_expr(s.value.as_deref())?
            ),
            ast::Stmt::For(s) => self.for_loop("for", &s.target, &s.iter, &s.body, &s.orelse)?,
            ast::Stmt::AsyncFor(s) => {
                self.for_loop("async-for", &s.target, &s.iter, &s.body, &s.orelse)?
            }
            ast::Stmt::While(s) => format!(
                "(while test={} body=[{}] orelse=[{}])",
                self.expr(&s.test)?,
                self.body(&s.body, false)?,
                self.body(&s.orelse, false)?
            ),
            ast::Stmt::If(s) => format!(
                "(if test={} body=[{}] orelse=[{}])",
                self.expr(&s.test)?,
                self.body(&s.body, false)?,
                self.body(&s.orelse, false)?
            ),
            ast::Stmt::With(s) => self.with_stmt("with", &s.items, &s.body)?,
            ast::Stmt::AsyncWith(s) => self.with_stmt("async-with", &s.items, &s.body)?,
            ast::Stmt::Match(s) => {
                let subject = self.expr(&s.subject)?;
                let mut cases = Vec::with_capacity(s.cases.len());
                for case in &s.cases {
                    cases.push(format!(
                        "(case pattern={} guard={} body=[{}])",
                        self.match_pattern(&case.pattern)?,
                        self.opt_expr(case.guard.as_deref())?,
                        self.body(&case.body, false)?
                    ));
                }
                format!("(match subject={subject} cases=[{}])", cases.join(" "))
            }
            ast::Stmt::Raise(s) => format!(
                "(raise exc={} cause={})",
                self.opt_expr(s.exc.as_deref())?,
                self.opt_expr(s.cause.as_deref())?
            ),
            ast::Stmt::Try(s) => {
                let body = self.body(&s.body, false)?;
                let mut handlers = Vec::with_capacity(s.handlers.len());
                for handler in &s.handlers {
                    let ast::ExceptHandler::ExceptHandler(h) = handler;
                    handlers.push(format!(
                        "(handler type={} name={:?} body=[{}])",
                        self.opt_expr(h.type_.as_deref())?,
                        h.name.as_ref().map(|n| n.as_str()),
                        self.body(&h.body, false)?
                    ));
                }
                format!(
                    "(try body=[{body}] handlers=[{}] orelse=[{}] final=[{}])",
                    handlers.join(" "),
                    self.body(&s.orelse, false)?,
                    self.body(&s.finalbody, false)?
                )
            }
            ast::Stmt::Assert(s) => format!(
                "(assert test={} msg={})",
                self.expr(&s.test)?,
                self.opt_expr(s.msg.as_deref())?
            ),
            ast::Stmt::Import(s) => format!("(import [{}])", self.aliases(&s.names)),
            ast::Stmt::ImportFrom(s) => format!(
                "(import-from module={:?} names=[{}] level={:?})",
                s.module.as_ref().map(|m| m.as_str()),
                self.aliases(&s.names),
                s.level
            ),
            ast::Stmt::Global(s) => format!(
                "(global [{}])",
                s.names.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(" ")
            ),
            ast::Stmt::Nonlocal(s) => format!(
                "(nonlocal [{}])",
                s.names.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(" ")
            ),
            ast::Stmt::Expr(s) => format!("(expr {})", self.expr(&s.value)?),
            ast::Stmt::Pass(_) => "(pass)".to_string(),
            ast::Stmt::Break(_) => "(break)".to_string(),
            ast::Stmt::Continue(_) => "(continue)".to_string(),
            _ => return Err(ParseFailure("unsupported statement form".to_string())),
        })
    }

    fn expr(&mut self, expr: &ast::Expr) -> Result<String, ParseFailure> {
        Ok(match expr {
            ast::Expr::BoolOp(e) => format!("(boolop {:?} [{}])", e.op, self.exprs(&e.values)?),
            ast::Expr::NamedExpr(e) => format!(
                "(walrus target={} value={})",
                self.expr(&e.target)?,
                self.expr(&e.value)?
            ),
            ast::Expr::BinOp(e) => format!(
                "(binop {:?} {} {})",
                e.op,
                self.expr(&e.left)?,
                self.expr(&e.right)?
            ),
            ast::Expr::UnaryOp(e) => {
                format!("(unary {:?} {})", e.op, self.expr(&e.operand)?)
            }
            ast::Expr::Lambda(e) => {
                let params = self.enter_parameters(&e.args)?;
                let body = self.expr(&e.body)?;
                self.pop_scope();
                format!("(lambda params=({params}) body={body})")
            }
            ast::Expr::IfExp(e) => format!(
                "(ifexp test={} body={} orelse={})",
                self.expr(&e.test)?,
                self.expr(&e.body)?,
                self.expr(&e.orelse)?
            ),
            ast::Expr::Dict(e) => {
                let mut entries = Vec::with_capacity(e.values.len());
                for (key, value) in e.keys.iter().zip(e.values.iter()) {
                    let key = match key {
                        Some(key) => self.expr(key)?,
                        None => "**".to_string(),
                    };
                    entries.push(format!("({key} {})", self.expr(value)?));
                }
                format!("(dict [{}])", entries.join(" "))
            }
            ast::Expr::Set(e) => format!("(set [{}])", self.exprs(&e.elts)?),
            ast::Expr::ListComp(e) => {
                self.comprehension("listcomp", &e.generators, &[&e.elt])?
            }
            ast::Expr::SetComp(e) => self.comprehension("setcomp", &e.generators, &[&e.elt])?,
            ast::Expr::DictComp(e) => {
                self.comprehension("dictcomp", &e.generators, &[&e.key, &e.value])?
            }
            ast::Expr::GeneratorExp(e) => {
                self.comprehension("genexp", &e.generators, &[&e.elt])?
            }
            ast::Expr::Await(e) => format!("(await {})", self.expr(&e.value)?),
            ast::Expr::Yield(e) => format!("(yield {})", self.opt_expr(e.value.as_deref())?),
            ast::Expr::YieldFrom(e) => format!("(yield-from {})", self.expr(&e.value)?),
            ast::Expr::Compare(e) => {
                let mut parts = vec![self.expr(&e.left)?];
                for (op, comparator) in e.ops.iter().zip(e.comparators.iter()) {
                    parts.push(format!("{op:?} {}", self.expr(comparator)?));
                }
                format!("(compare {})", parts.join(" "))
            }
            ast::Expr::Call(e) => format!(
                "(call func={} args=[{}] keywords=[{}])",
                self.expr(&e.func)?,
                self.exprs(&e.args)?,
                self.keywords(&e.keywords)?
            ),
            ast::Expr::FormattedValue(e) => format!(
                "(fval value={} conversion={:?} spec={})",
                self.expr(&e.value)?,
                e.conversion,
                self.opt_expr(e.format_spec.as_deref())?
            ),
            ast::Expr::JoinedStr(e) => format!("(fstring [{}])", self.exprs(&e.values)?),
            ast::Expr::Constant(e) => constant_repr(&e.value),
            ast::Expr::Attribute(e) => format!(
                "(attr value={} attr={})",
                self.expr(&e.value)?,
                e.attr.as_str()
            ),
            ast::Expr::Subscript(e) => format!(
                "(subscript value={} index={})",
                self.expr(&e.value)?,
                self.expr(&e.slice)?
            ),
            ast::Expr::Starred(e) => format!("(starred {})", self.expr(&e.value)?),
            ast::Expr::Name(e) => format!("(name {})", self.rename(e.id.as_str())),
            ast::Expr::List(e) => format!("(list [{}])", self.exprs(&e.elts)?),
            ast::Expr::Tuple(e) => format!("(tuple [{}])", self.exprs(&e.elts)?),
            ast::Expr::Slice(e) => {
                let lower = self.slice_bound(e.lower.as_deref(), SliceBound::Lower)?;
                let upper = self.slice_bound(e.upper.as_deref(), SliceBound::Upper)?;
                let step = self.slice_bound(e.step.as_deref(), SliceBound::Step)?;
                format!("(slice lower={lower} upper={upper} step={step})")
            }
        })
    }

    fn exprs(&mut self, exprs: &[ast::Expr]) -> Result<String, ParseFailure> {
        let mut parts = Vec::with_capacity(exprs.len());
        for expr in exprs {
            parts.push(self.expr(expr)?);
        }
        Ok(parts.join(" "))
    }

    fn opt_expr(&mut self, expr: Option<&ast::Expr>) -> Result<String, ParseFailure> {
        match expr {
            Some(expr) => self.expr(expr),
            None => Ok("_".to_string()),
        }
    }

    fn keywords(&mut self, keywords: &[ast::Keyword]) -> Result<String, ParseFailure> {
        let mut parts = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let name = keyword.arg.as_ref().map(|a| a.as_str()).unwrap_or("**");
            parts.push(format!("(kw {name} {})", self.expr(&keyword.value)?));
        }
        Ok(parts.join(" "))
    }

    fn aliases(&self, names: &[ast::Alias]) -> String {
        names
            .iter()
            .map(|alias| {
                format!(
                    "(alias name={} as={:?})",
                    alias.name.as_str(),
                    alias.asname.as_ref().map(|a| a.as_str())
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn function(
        &mut self,
        label: &str,
        name: &str,
        args: &ast::Arguments,
        body: &[ast::Stmt],
        decorators: &[ast::Expr],
        returns: Option<&ast::Expr>,
    ) -> Result<String, ParseFailure> {
        let decorators = self.exprs(decorators)?;
        let returns = self.opt_expr(returns)?;
        let params = self.enter_parameters(args)?;
        let body = self.body(body, true)?;
        self.pop_scope();
        Ok(format!(
            "({label} name={name} params=({params}) returns={returns} decorators=[{decorators}] body=[{body}])"
        ))
    }

    /// Render a parameter list and enter the function scope. Annotations and
    /// defaults evaluate in the enclosing scope, so they are rendered before
    /// any parameter name binds. The caller pops the scope after rendering
    /// the body.
    fn enter_parameters(&mut self, args: &ast::Arguments) -> Result<String, ParseFailure> {
        let posonly_count = args.posonlyargs.len();
        let mut positional = Vec::with_capacity(posonly_count + args.args.len());
        for param in args.posonlyargs.iter().chain(args.args.iter()) {
            positional.push((
                param.def.arg.as_str().to_string(),
                self.opt_expr(param.def.annotation.as_deref())?,
                self.opt_expr(param.default.as_deref())?,
            ));
        }
        let vararg = match &args.vararg {
            Some(arg) => Some((
                arg.arg.as_str().to_string(),
                self.opt_expr(arg.annotation.as_deref())?,
            )),
            None => None,
        };
        let mut kwonly = Vec::with_capacity(args.kwonlyargs.len());
        for param in &args.kwonlyargs {
            kwonly.push((
                param.def.arg.as_str().to_string(),
                self.opt_expr(param.def.annotation.as_deref())?,
                self.opt_expr(param.default.as_deref())?,
            ));
        }
        let kwarg = match &args.kwarg {
            Some(arg) => Some((
                arg.arg.as_str().to_string(),
                self.opt_expr(arg.annotation.as_deref())?,
            )),
            None => None,
        };

        self.push_scope();
        let mut rendered = Vec::new();
        for (index, (name, annotation, default)) in positional.into_iter().enumerate() {
            let placeholder = self.bind(&name);
            let marker = if index < posonly_count { "posonly" } else { "arg" };
            rendered.push(format!("({marker} {placeholder} ann={annotation} default={default})"));
        }
        if let Some((name, annotation)) = vararg {
            let placeholder = self.bind(&name);
            rendered.push(format!("(vararg {placeholder} ann={annotation})"));
        }
        for (name, annotation, default) in kwonly {
            let placeholder = self.bind(&name);
            rendered.push(format!("(kwonly {placeholder} ann={annotation} default={default})"));
        }
        if let Some((name, annotation)) = kwarg {
            let placeholder = self.bind(&name);
            rendered.push(format!("(kwarg {placeholder} ann={annotation})"));
        }
        Ok(rendered.join(" "))
    }

    fn for_loop(
        &mut self,
        label: &str,
        target: &ast::Expr,
        iter: &ast::Expr,
        body: &[ast::Stmt],
        orelse: &[ast::Stmt],
    ) -> Result<String, ParseFailure> {
        // The iterable evaluates before the loop target binds.
        let iter = self.expr(iter)?;
        self.bind_target(target);
        let target = self.expr(target)?;
        Ok(format!(
            "({label} target={target} iter={iter} body=[{}] orelse=[{}])",
            self.body(body, false)?,
            self.body(orelse, false)?
        ))
    }

    fn with_stmt(
        &mut self,
        label: &str,
        items: &[ast::WithItem],
        body: &[ast::Stmt],
    ) -> Result<String, ParseFailure> {
        let mut rendered = Vec::with_capacity(items.len());
        for item in items {
            rendered.push(format!(
                "(item ctx={} vars={})",
                self.expr(&item.context_expr)?,
                self.opt_expr(item.optional_vars.as_deref())?
            ));
        }
        Ok(format!(
            "({label} items=[{}] body=[{}])",
            rendered.join(" "),
            self.body(body, false)?
        ))
    }

    fn comprehension(
        &mut self,
        label: &str,
        generators: &[ast::Comprehension],
        elts: &[&ast::Expr],
    ) -> Result<String, ParseFailure> {
        self.push_scope();
        let mut gens = Vec::with_capacity(generators.len());
        for generator in generators {
            // The first iterable evaluates in the enclosing scope; rendering
            // it before the target binds preserves that.
            let iter = self.expr(&generator.iter)?;
            self.bind_target(&generator.target);
            let target = self.expr(&generator.target)?;
            let ifs = self.exprs(&generator.ifs)?;
            let marker = if generator.is_async { "gen-async" } else { "gen" };
            gens.push(format!("({marker} target={target} iter={iter} ifs=[{ifs}])"));
        }
        let mut elt_parts = Vec::with_capacity(elts.len());
        for elt in elts {
            elt_parts.push(self.expr(elt)?);
        }
        self.pop_scope();
        Ok(format!(
            "({label} elt=[{}] gens=[{}])",
            elt_parts.join(" "),
            gens.join(" ")
        ))
    }

    fn match_pattern(&mut self, pattern: &ast::Pattern) -> Result<String, ParseFailure> {
        Ok(match pattern {
            ast::Pattern::MatchValue(p) => format!("(p-value {})", self.expr(&p.value)?),
            ast::Pattern::MatchSingleton(p) => {
                format!("(p-singleton {})", constant_repr(&p.value))
            }
            ast::Pattern::MatchSequence(p) => {
                format!("(p-seq [{}])", self.patterns(&p.patterns)?)
            }
            ast::Pattern::MatchMapping(p) => format!(
                "(p-map keys=[{}] patterns=[{}] rest={:?})",
                self.exprs(&p.keys)?,
                self.patterns(&p.patterns)?,
                p.rest.as_ref().map(|r| r.as_str())
            ),
            ast::Pattern::MatchClass(p) => format!(
                "(p-class cls={} patterns=[{}] attrs=[{}] kwd-patterns=[{}])",
                self.expr(&p.cls)?,
                self.patterns(&p.patterns)?,
                p.kwd_attrs
                    .iter()
                    .map(|a| a.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                self.patterns(&p.kwd_patterns)?
            ),
            ast::Pattern::MatchStar(p) => {
                format!("(p-star {:?})", p.name.as_ref().map(|n| n.as_str()))
            }
            ast::Pattern::MatchAs(p) => {
                let inner = match &p.pattern {
                    Some(inner) => self.match_pattern(inner)?,
                    None => "_".to_string(),
                };
                format!("(p-as pattern={inner} name={:?})", p.name.as_ref().map(|n| n.as_str()))
            }
            ast::Pattern::MatchOr(p) => format!("(p-or [{}])", self.patterns(&p.patterns)?),
        })
    }

    fn patterns(&mut self, patterns: &[ast::Pattern]) -> Result<String, ParseFailure> {
        let mut parts = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            parts.push(self.match_pattern(pattern)?);
        }
        Ok(parts.join(" "))
    }

    fn slice_bound(
        &mut self,
        bound: Option<&ast::Expr>,
        position: SliceBound,
    ) -> Result<String, ParseFailure> {
        match bound {
            None => Ok("_".to_string()),
            Some(expr) if self.options.normalize_slices && is_identity_bound(expr, position) => {
                Ok("_".to_string())
            }
            Some(expr) => self.expr(expr),
        }
    }
}

fn is_docstring(stmt: &ast::Stmt) -> bool {
    match stmt {
        ast::Stmt::Expr(expr_stmt) => matches!(
            expr_stmt.value.as_ref(),
            ast::Expr::Constant(constant) if matches!(constant.value, ast::Constant::Str(_))
        ),
        _ => false,
    }
}

/// Whether a slice bound is the identity value for its position: an explicit
/// `None` anywhere, `0` as the lower bound, `1` as the step.
fn is_identity_bound(expr: &ast::Expr, position: SliceBound) -> bool {
    let ast::Expr::Constant(constant) = expr else {
        return false;
    };
    match &constant.value {
        ast::Constant::None => true,
        ast::Constant::Int(value) => match position {
            SliceBound::Lower => value.to_string() == "0",
            SliceBound::Step => value.to_string() == "1",
            SliceBound::Upper => false,
        },
        _ => false,
    }
}

fn constant_repr(value: &ast::Constant) -> String {
    match value {
        ast::Constant::None => "(const none)".to_string(),
        ast::Constant::Bool(value) => format!("(const bool {value})"),
        ast::Constant::Str(value) => format!("(const str {value:?})"),
        ast::Constant::Bytes(value) => format!("(const bytes {value:?})"),
        ast::Constant::Int(value) => format!("(const int {value})"),
        ast::Constant::Float(value) => format!("(const float {value:?})"),
        ast::Constant::Complex { real, imag } => {
            format!("(const complex {real:?} {imag:?})")
        }
        ast::Constant::Ellipsis => "(const ellipsis)".to_string(),
        ast::Constant::Tuple(values) => {
            let parts: Vec<String> = values.iter().map(constant_repr).collect();
            format!("(const tuple [{}])", parts.join(" "))
        }
    }
}
