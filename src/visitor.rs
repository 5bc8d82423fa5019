use crate::config::AnalyzerConfig;
use crate::utils::LineIndex;
use crate::widget::{Geometry, LayoutKind, SizeHint, WidgetMap, WidgetRecord};
use rustpython_ast::{self as ast, Constant, Expr, Stmt};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Widget methods the extractor understands. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutator {
    Geometry,
    MinimumSize,
    MaximumSize,
    FixedSize,
    StyleSheet,
    Visible,
    Hidden,
    Hide,
    Show,
    Enabled,
    Disabled,
    Layout,
    AddChild,
}

impl Mutator {
    pub fn from_method(name: &str) -> Option<Self> {
        let mutator = match name {
            "setGeometry" => Mutator::Geometry,
            "setMinimumSize" => Mutator::MinimumSize,
            "setMaximumSize" => Mutator::MaximumSize,
            "setFixedSize" => Mutator::FixedSize,
            "setStyleSheet" => Mutator::StyleSheet,
            "setVisible" => Mutator::Visible,
            "setHidden" => Mutator::Hidden,
            "hide" => Mutator::Hide,
            "show" => Mutator::Show,
            "setEnabled" => Mutator::Enabled,
            "setDisabled" => Mutator::Disabled,
            "setLayout" => Mutator::Layout,
            "addWidget" | "addLayout" => Mutator::AddChild,
            _ => return None,
        };
        Some(mutator)
    }
}

/// A literal argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Str(String),
    Bool(bool),
}

/// Best-effort constant extraction. Non-literal expressions yield `None`.
pub fn literal(expr: &Expr) -> Option<Literal> {
    match expr {
        Expr::Constant(node) => match &node.value {
            Constant::Bool(b) => Some(Literal::Bool(*b)),
            Constant::Str(s) => Some(Literal::Str(s.to_string())),
            // Out-of-range integers are skipped.
            Constant::Int(i) => i.to_string().parse().ok().map(Literal::Int),
            _ => None,
        },
        Expr::UnaryOp(node) if matches!(node.op, ast::UnaryOp::USub) => {
            match literal(&node.operand)? {
                Literal::Int(i) => Some(Literal::Int(-i)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn int_arg(args: &[Expr], idx: usize) -> Option<i64> {
    match literal(args.get(idx)?)? {
        Literal::Int(i) => Some(i),
        _ => None,
    }
}

fn bool_arg(args: &[Expr], idx: usize) -> Option<bool> {
    match literal(args.get(idx)?)? {
        Literal::Bool(b) => Some(b),
        _ => None,
    }
}

fn size_args(args: &[Expr]) -> Option<SizeHint> {
    Some(SizeHint {
        width: int_arg(args, 0)?,
        height: int_arg(args, 1)?,
    })
}

fn geometry_args(args: &[Expr]) -> Option<Geometry> {
    Some(Geometry::new(
        int_arg(args, 0)?,
        int_arg(args, 1)?,
        int_arg(args, 2)?,
        int_arg(args, 3)?,
    ))
}

/// Name of the class being constructed: `QLabel(...)` or `QtWidgets.QLabel(...)`.
fn callee_name(func: &Expr) -> Option<&str> {
    match func {
        Expr::Name(node) => Some(node.id.as_str()),
        Expr::Attribute(node) => Some(node.attr.as_str()),
        _ => None,
    }
}

/// Attribute name of `receiver.attr`, e.g. `title` for `self.title`.
fn attribute_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Attribute(node) => Some(node.attr.as_str()),
        _ => None,
    }
}

/// Statement lists nested directly inside `stmt`. Class bodies are not
/// included; nested classes are discovered separately.
pub(crate) fn nested_bodies(stmt: &Stmt) -> Vec<&[Stmt]> {
    match stmt {
        Stmt::FunctionDef(node) => vec![node.body.as_slice()],
        Stmt::AsyncFunctionDef(node) => vec![node.body.as_slice()],
        Stmt::If(node) => vec![node.body.as_slice(), node.orelse.as_slice()],
        Stmt::For(node) => vec![node.body.as_slice(), node.orelse.as_slice()],
        Stmt::AsyncFor(node) => vec![node.body.as_slice(), node.orelse.as_slice()],
        Stmt::While(node) => vec![node.body.as_slice(), node.orelse.as_slice()],
        Stmt::With(node) => vec![node.body.as_slice()],
        Stmt::AsyncWith(node) => vec![node.body.as_slice()],
        Stmt::Try(node) => {
            let mut bodies = vec![node.body.as_slice()];
            for handler in &node.handlers {
                match handler {
                    ast::ExceptHandler::ExceptHandler(h) => bodies.push(h.body.as_slice()),
                }
            }
            bodies.push(node.orelse.as_slice());
            bodies.push(node.finalbody.as_slice());
            bodies
        }
        Stmt::TryStar(node) => {
            let mut bodies = vec![node.body.as_slice()];
            for handler in &node.handlers {
                match handler {
                    ast::ExceptHandler::ExceptHandler(h) => bodies.push(h.body.as_slice()),
                }
            }
            bodies.push(node.orelse.as_slice());
            bodies.push(node.finalbody.as_slice());
            bodies
        }
        Stmt::Match(node) => node.cases.iter().map(|case| case.body.as_slice()).collect(),
        _ => Vec::new(),
    }
}

/// Walks a module and builds the widget map.
///
/// Only classes deriving from a recognized UI type are inspected. Inside
/// such a class every method is scanned twice: first for
/// `self.name = Widget(...)` construction sites, then for mutator calls on
/// the widgets found. Calls that cannot be interpreted are skipped.
pub struct WidgetVisitor<'a> {
    pub widgets: WidgetMap,
    config: &'a AnalyzerConfig,
    line_index: &'a LineIndex,
    /// Enclosing class names, innermost last.
    class_stack: Vec<String>,
    /// Local names bound to layout constructors in the current method.
    local_layouts: HashMap<String, String>,
}

impl<'a> WidgetVisitor<'a> {
    pub fn new(config: &'a AnalyzerConfig, line_index: &'a LineIndex) -> Self {
        Self {
            widgets: WidgetMap::new(),
            config,
            line_index,
            class_stack: Vec::new(),
            local_layouts: HashMap::new(),
        }
    }

    /// Convenience wrapper: visits every statement and returns the map.
    ///
    /// Parent names taken from `parent=` keywords are checked last, once every
    /// construction in the file is known, so a widget may name a parent that
    /// is built further down.
    pub fn extract(mut self, body: &[Stmt]) -> WidgetMap {
        for stmt in body {
            self.visit_stmt(stmt);
        }
        self.resolve_parents();
        self.widgets
    }

    /// Clears parent links that name no tracked widget (`parent=self.central`
    /// where `central` is never constructed), so every recorded parent is a
    /// key of the map.
    fn resolve_parents(&mut self) {
        let dangling: Vec<String> = self
            .widgets
            .iter()
            .filter(|w| {
                w.parent
                    .as_deref()
                    .is_some_and(|parent| !self.widgets.contains(parent))
            })
            .map(|w| w.name.clone())
            .collect();

        for name in dangling {
            trace!(widget = %name, "parent is not a tracked widget");
            self.update(&name, |w| w.parent = None);
        }
    }

    /// Finds class definitions at any depth.
    pub fn visit_stmt(&mut self, stmt: &Stmt) {
        if let Stmt::ClassDef(node) = stmt {
            self.class_stack.push(node.name.to_string());
            if self.is_ui_class(&node.bases) {
                debug!(class = %node.name, "extracting widgets");
                self.extract_class(&node.body);
            }
            for stmt in &node.body {
                self.visit_stmt(stmt);
            }
            self.class_stack.pop();
            return;
        }

        for body in nested_bodies(stmt) {
            for stmt in body {
                self.visit_stmt(stmt);
            }
        }
    }

    /// True if any base (`QWidget` or `QtWidgets.QWidget`) is a recognized type.
    fn is_ui_class(&self, bases: &[Expr]) -> bool {
        bases
            .iter()
            .filter_map(callee_name)
            .any(|base| self.config.is_widget_type(base))
    }

    fn current_class(&self) -> &str {
        self.class_stack.last().map(String::as_str).unwrap_or("")
    }

    fn extract_class(&mut self, body: &[Stmt]) {
        let methods: Vec<&[Stmt]> = body
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::FunctionDef(node) => Some(node.body.as_slice()),
                Stmt::AsyncFunctionDef(node) => Some(node.body.as_slice()),
                _ => None,
            })
            .collect();

        for method in &methods {
            self.collect_constructions(method);
        }
        for method in &methods {
            self.local_layouts.clear();
            self.collect_mutations(method);
        }
    }

    // Phase one: construction sites, nested blocks included.
    fn collect_constructions(&mut self, body: &[Stmt]) {
        for stmt in body {
            match stmt {
                Stmt::Assign(node) => {
                    let targets: Vec<&Expr> = node.targets.iter().collect();
                    let line = self.line_index.line_index(node.range.start());
                    self.record_construction(&targets, &node.value, line);
                }
                Stmt::AnnAssign(node) => {
                    if let Some(value) = &node.value {
                        let line = self.line_index.line_index(node.range.start());
                        self.record_construction(&[&*node.target], value, line);
                    }
                }
                _ => {}
            }
            for nested in nested_bodies(stmt) {
                self.collect_constructions(nested);
            }
        }
    }

    /// Records `self.name = Widget(...)` for every attribute target.
    ///
    /// The parent comes from a `parent=self.other` keyword and is kept as
    /// written here; `resolve_parents` drops it later if `other` never
    /// turns out to be a widget.
    fn record_construction(&mut self, targets: &[&Expr], value: &Expr, line: usize) {
        let Expr::Call(call) = value else {
            return;
        };
        let Some(widget_type) = callee_name(&call.func) else {
            return;
        };
        if !self.config.is_widget_type(widget_type) {
            return;
        }

        let parent = call
            .keywords
            .iter()
            .find(|kw| kw.arg.as_ref().map(|a| a.as_str()) == Some("parent"))
            .and_then(|kw| attribute_name(&kw.value))
            .map(str::to_string);

        for target in targets {
            let Some(name) = attribute_name(target) else {
                continue;
            };
            let mut record = WidgetRecord::new(name, widget_type, self.current_class(), line);
            record.parent = parent.clone();
            if let Some(old) = self.widgets.insert(record) {
                debug!(name, previous_line = old.line, line, "widget name redeclared");
            }
        }
    }

    // Phase two: mutator calls in source order.
    fn collect_mutations(&mut self, body: &[Stmt]) {
        for stmt in body {
            match stmt {
                Stmt::Expr(node) => self.visit_expr(&node.value),
                Stmt::Assign(node) => {
                    self.visit_expr(&node.value);
                    self.bind_local_layout(&node.targets, &node.value);
                }
                Stmt::AnnAssign(node) => {
                    if let Some(value) = &node.value {
                        self.visit_expr(value);
                    }
                }
                Stmt::AugAssign(node) => self.visit_expr(&node.value),
                Stmt::Return(node) => {
                    if let Some(value) = &node.value {
                        self.visit_expr(value);
                    }
                }
                Stmt::If(node) => self.visit_expr(&node.test),
                Stmt::While(node) => self.visit_expr(&node.test),
                Stmt::For(node) => self.visit_expr(&node.iter),
                Stmt::AsyncFor(node) => self.visit_expr(&node.iter),
                Stmt::With(node) => {
                    for item in &node.items {
                        self.visit_expr(&item.context_expr);
                    }
                }
                Stmt::AsyncWith(node) => {
                    for item in &node.items {
                        self.visit_expr(&item.context_expr);
                    }
                }
                Stmt::Match(node) => self.visit_expr(&node.subject),
                _ => {}
            }
            for nested in nested_bodies(stmt) {
                self.collect_mutations(nested);
            }
        }
    }

    /// Remembers `layout = QVBoxLayout(...)` so a later `setLayout(layout)`
    /// can name the concrete class.
    fn bind_local_layout(&mut self, targets: &[Expr], value: &Expr) {
        let Expr::Call(call) = value else {
            return;
        };
        let Some(callee) = callee_name(&call.func) else {
            return;
        };
        for target in targets {
            if let Expr::Name(name) = target {
                if self.config.is_layout_type(callee) {
                    self.local_layouts
                        .insert(name.id.to_string(), callee.to_string());
                } else {
                    self.local_layouts.remove(name.id.as_str());
                }
            }
        }
    }

    /// Visits an expression looking for calls on tracked widgets.
    pub fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Call(node) => {
                self.apply_call(node);
                self.visit_expr(&node.func);
                for arg in &node.args {
                    self.visit_expr(arg);
                }
                for keyword in &node.keywords {
                    self.visit_expr(&keyword.value);
                }
            }
            Expr::Attribute(node) => self.visit_expr(&node.value),
            Expr::BoolOp(node) => {
                for value in &node.values {
                    self.visit_expr(value);
                }
            }
            Expr::BinOp(node) => {
                self.visit_expr(&node.left);
                self.visit_expr(&node.right);
            }
            Expr::UnaryOp(node) => self.visit_expr(&node.operand),
            Expr::NamedExpr(node) => self.visit_expr(&node.value),
            Expr::Lambda(node) => self.visit_expr(&node.body),
            Expr::IfExp(node) => {
                self.visit_expr(&node.test);
                self.visit_expr(&node.body);
                self.visit_expr(&node.orelse);
            }
            Expr::Await(node) => self.visit_expr(&node.value),
            Expr::Compare(node) => {
                self.visit_expr(&node.left);
                for comparator in &node.comparators {
                    self.visit_expr(comparator);
                }
            }
            Expr::Subscript(node) => {
                self.visit_expr(&node.value);
                self.visit_expr(&node.slice);
            }
            Expr::Starred(node) => self.visit_expr(&node.value),
            Expr::List(node) => {
                for elt in &node.elts {
                    self.visit_expr(elt);
                }
            }
            Expr::Tuple(node) => {
                for elt in &node.elts {
                    self.visit_expr(elt);
                }
            }
            Expr::Set(node) => {
                for elt in &node.elts {
                    self.visit_expr(elt);
                }
            }
            Expr::Dict(node) => {
                for (key, value) in node.keys.iter().zip(&node.values) {
                    if let Some(k) = key {
                        self.visit_expr(k);
                    }
                    self.visit_expr(value);
                }
            }
            Expr::ListComp(node) => {
                self.visit_expr(&node.elt);
                for gen in &node.generators {
                    self.visit_expr(&gen.iter);
                }
            }
            Expr::GeneratorExp(node) => {
                self.visit_expr(&node.elt);
                for gen in &node.generators {
                    self.visit_expr(&gen.iter);
                }
            }
            _ => {}
        }
    }

    /// Applies one `self.<widget>.<method>(...)` call to the widget map.
    ///
    /// The receiver must be an attribute already tracked as a widget and the
    /// method must be in the `Mutator` table. Arguments that are not literals
    /// leave the record unchanged.
    fn apply_call(&mut self, call: &ast::ExprCall) {
        let Expr::Attribute(func) = &*call.func else {
            return;
        };
        let Some(mutator) = Mutator::from_method(func.attr.as_str()) else {
            return;
        };
        let Some(receiver) = attribute_name(&func.value) else {
            return;
        };
        if !self.widgets.contains(receiver) {
            trace!(receiver, method = %func.attr, "receiver is not a tracked widget");
            return;
        }
        let receiver = receiver.to_string();
        let args = call.args.as_slice();

        match mutator {
            Mutator::AddChild => self.add_child(&receiver, args),
            Mutator::Layout => {
                let kind = self.resolve_layout(args);
                if let Some(kind) = kind {
                    self.update(&receiver, |w| w.layout = Some(kind));
                }
            }
            Mutator::Geometry => {
                if let Some(g) = geometry_args(args) {
                    self.update(&receiver, |w| w.geometry = Some(g));
                }
            }
            Mutator::MinimumSize => {
                if let Some(size) = size_args(args) {
                    self.update(&receiver, |w| w.properties.min_size = Some(size));
                }
            }
            Mutator::MaximumSize => {
                if let Some(size) = size_args(args) {
                    self.update(&receiver, |w| w.properties.max_size = Some(size));
                }
            }
            Mutator::FixedSize => {
                if let Some(size) = size_args(args) {
                    self.update(&receiver, |w| {
                        w.properties.min_size = Some(size);
                        w.properties.max_size = Some(size);
                    });
                }
            }
            Mutator::StyleSheet => {
                if let Some(Literal::Str(style)) = args.first().and_then(literal) {
                    self.update(&receiver, |w| w.stylesheet = Some(style));
                }
            }
            Mutator::Visible => {
                if let Some(visible) = bool_arg(args, 0) {
                    self.update(&receiver, |w| w.visible = visible);
                }
            }
            Mutator::Hidden => {
                if let Some(hidden) = bool_arg(args, 0) {
                    self.update(&receiver, |w| w.visible = !hidden);
                }
            }
            Mutator::Hide => self.update(&receiver, |w| w.visible = false),
            Mutator::Show => self.update(&receiver, |w| w.visible = true),
            Mutator::Enabled => {
                if let Some(enabled) = bool_arg(args, 0) {
                    self.update(&receiver, |w| w.enabled = enabled);
                }
            }
            Mutator::Disabled => {
                if let Some(disabled) = bool_arg(args, 0) {
                    self.update(&receiver, |w| w.enabled = !disabled);
                }
            }
        }
    }

    /// Runs `f` on the named record, if it exists.
    fn update(&mut self, name: &str, f: impl FnOnce(&mut WidgetRecord)) {
        if let Some(widget) = self.widgets.get_mut(name) {
            f(widget);
        }
    }

    /// Layout marker for `setLayout(arg)`: the concrete class when `arg` is a
    /// local bound to a layout constructor or a tracked layout attribute,
    /// the generic marker otherwise. `None` only when the call has no argument.
    fn resolve_layout(&self, args: &[Expr]) -> Option<LayoutKind> {
        let arg = args.first()?;
        let resolved = match arg {
            Expr::Name(node) => self.local_layouts.get(node.id.as_str()).cloned(),
            Expr::Attribute(node) => self
                .widgets
                .get(node.attr.as_str())
                .filter(|w| self.config.is_layout_type(&w.widget_type))
                .map(|w| w.widget_type.clone()),
            _ => None,
        };
        Some(resolved.map_or(LayoutKind::Detected, LayoutKind::Resolved))
    }

    /// `container.addWidget(self.child, ...)`: links both directions.
    /// Self-adds and untracked children are ignored.
    fn add_child(&mut self, container: &str, args: &[Expr]) {
        let Some(child) = args.first().and_then(attribute_name) else {
            return;
        };
        if child == container || !self.widgets.contains(child) {
            return;
        }
        let child = child.to_string();
        self.update(&child, |w| w.parent = Some(container.to_string()));
        self.update(container, |w| w.children.push(child));
    }
}
