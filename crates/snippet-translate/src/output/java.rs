//! Java writer.
//!
//! Every value is typed `Object`. Java has no free functions or loose
//! statements, so a module that has any is wrapped in a synthesized
//! `public class Main`: functions become `public static Object` methods and
//! the loose statements form `main`. IR classes stay package-private
//! top-level classes whose functions are `public Object` instance methods.

use super::{Declarations, JAVA_SYNTAX, loop_target, needs_blank_line};
use crate::input::java::WRAPPER_CLASSES;
use crate::ir::{Node, Param, Position};
use crate::language::Language;
use crate::traits::{GenerateError, Writer};

/// Static instance of the Java writer for the registry.
pub static JAVA_WRITER: JavaWriterImpl = JavaWriterImpl;

/// Java writer implementing the Writer trait.
pub struct JavaWriterImpl;

impl Writer for JavaWriterImpl {
    fn language(&self) -> Language {
        Language::Java
    }

    fn write(&self, node: &Node) -> Result<String, GenerateError> {
        JavaWriter::emit(node)
    }
}

/// Emits IR as Java source code.
pub struct JavaWriter {
    output: String,
    indent: usize,
}

impl JavaWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Emit a module, a statement or an expression as Java source.
    ///
    /// A lone function is emitted as a static method without the wrapper.
    pub fn emit(node: &Node) -> Result<String, GenerateError> {
        let mut writer = Self::new();
        match node {
            Node::Module { body } => writer.write_module(body)?,
            Node::Function { name, params, body } => {
                writer.write_method(
                    "public static Object",
                    name,
                    params,
                    body,
                    Declarations::with_params(params),
                )?;
            }
            stmt if stmt.is_statement() => {
                writer.write_body(std::slice::from_ref(stmt), &mut Declarations::default())?;
            }
            expr => writer.output.push_str(&JAVA_SYNTAX.expr(expr)?),
        }
        Ok(writer.output)
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn write_module(&mut self, body: &[Node]) -> Result<(), GenerateError> {
        let wrapper = wrapper_name(body);
        let mut wrapped = false;
        let mut first = true;
        for item in body {
            if matches!(item, Node::Class { .. }) {
                if !first {
                    self.output.push('\n');
                }
                self.write_class(item)?;
            } else if !wrapped {
                if !first {
                    self.output.push('\n');
                }
                self.write_wrapper(&wrapper, body)?;
                wrapped = true;
            } else {
                continue;
            }
            first = false;
        }
        Ok(())
    }

    /// The synthesized class holding free functions and loose statements.
    fn write_wrapper(&mut self, name: &str, module: &[Node]) -> Result<(), GenerateError> {
        self.line(&format!("public class {name} {{"));
        self.indent += 1;

        let mut first = true;
        for item in module {
            if let Node::Function { name, params, body } = item {
                if !first {
                    self.output.push('\n');
                }
                let scope = Declarations::with_params(params);
                self.write_method("public static Object", name, params, body, scope)?;
                first = false;
            }
        }

        let statements: Vec<_> = module
            .iter()
            .filter(|item| !matches!(item, Node::Function { .. } | Node::Class { .. }))
            .cloned()
            .collect();
        if !statements.is_empty() {
            if !first {
                self.output.push('\n');
            }
            self.line("public static void main(String[] args) {");
            self.write_block(&statements, &mut Declarations::default(), "}")?;
        }

        self.indent -= 1;
        self.line("}");
        Ok(())
    }

    fn write_class(&mut self, class: &Node) -> Result<(), GenerateError> {
        let Node::Class { name, body } = class else {
            return Err(GenerateError::fault(class, Position::Statement));
        };
        self.line(&format!("class {name} {{"));
        self.indent += 1;
        for (i, member) in body.iter().enumerate() {
            if i > 0 && needs_blank_line(&body[i - 1], member) {
                self.output.push('\n');
            }
            match member {
                Node::Function { name, params, body: method } => {
                    let mut scope = Declarations::with_params(params);
                    scope.declare_fields(body);
                    self.write_method("public Object", name, params, method, scope)?;
                }
                Node::Assign { target, value } => {
                    self.line(&format!(
                        "Object {} = {};",
                        JAVA_SYNTAX.expr(target)?,
                        JAVA_SYNTAX.expr(value)?
                    ));
                }
                other => return Err(GenerateError::fault(other, Position::ClassMember)),
            }
        }
        self.indent -= 1;
        self.line("}");
        Ok(())
    }

    fn write_method(
        &mut self,
        signature: &str,
        name: &str,
        params: &[Param],
        body: &[Node],
        mut scope: Declarations,
    ) -> Result<(), GenerateError> {
        if params.iter().any(|param| param.default.is_some()) {
            tracing::debug!(function = name, "dropping parameter defaults");
        }
        let params_list = params
            .iter()
            .map(|param| format!("Object {}", param.name))
            .collect::<Vec<_>>()
            .join(", ");
        self.line(&format!("{signature} {name}({params_list}) {{"));
        self.write_block(body, &mut scope, "}")
    }

    fn write_body(&mut self, body: &[Node], scope: &mut Declarations) -> Result<(), GenerateError> {
        for (i, stmt) in body.iter().enumerate() {
            if i > 0 && needs_blank_line(&body[i - 1], stmt) {
                self.output.push('\n');
            }
            for name in scope.hoist(stmt) {
                self.line(&format!("Object {name} = null;"));
            }
            self.write_stmt(stmt, scope)?;
        }
        Ok(())
    }

    fn write_block(
        &mut self,
        body: &[Node],
        scope: &mut Declarations,
        closer: &str,
    ) -> Result<(), GenerateError> {
        self.indent += 1;
        self.write_body(body, scope)?;
        self.indent -= 1;
        self.line(closer);
        Ok(())
    }

    fn write_stmt(&mut self, stmt: &Node, scope: &mut Declarations) -> Result<(), GenerateError> {
        let expr = |node: &Node| JAVA_SYNTAX.expr(node);
        match stmt {
            // Local classes are legal Java; local methods are not.
            Node::Class { .. } => self.write_class(stmt)?,
            Node::Function { .. } | Node::Module { .. } => {
                return Err(GenerateError::fault(stmt, Position::Statement));
            }
            Node::Return { value: None } => self.line("return;"),
            Node::Return { value: Some(value) } => {
                self.line(&format!("return {};", expr(value)?));
            }
            Node::Assign { target, value } => {
                let keyword = if scope.declare(target) { "Object " } else { "" };
                self.line(&format!("{keyword}{} = {};", expr(target)?, expr(value)?));
            }
            Node::If { test, body, orelse } => self.write_if("", test, body, orelse, scope)?,
            Node::For { target, iter, body } => {
                let id = loop_target(target)?;
                self.line(&format!(
                    "for (int {id} = 0; {id} < {}; {id}++) {{",
                    JAVA_SYNTAX.loop_bound(iter)?
                ));
                let fresh = scope.enter_loop(id);
                self.write_block(body, scope, "}")?;
                scope.leave_loop(id, fresh);
            }
            Node::While { test, body } => {
                self.line(&format!("while ({}) {{", expr(test)?));
                self.write_block(body, scope, "}")?;
            }
            Node::Call { .. } => self.line(&format!("{};", expr(stmt)?)),
            Node::BinaryOp { .. } | Node::Name { .. } | Node::Literal { .. } => {
                return Err(GenerateError::fault(stmt, Position::Statement));
            }
        }
        Ok(())
    }

    fn write_if(
        &mut self,
        prefix: &str,
        test: &Node,
        body: &[Node],
        orelse: &[Node],
        scope: &mut Declarations,
    ) -> Result<(), GenerateError> {
        self.line(&format!("{prefix}if ({}) {{", JAVA_SYNTAX.expr(test)?));
        match orelse {
            [] => self.write_block(body, scope, "}"),
            [Node::If {
                test: next_test,
                body: next_body,
                orelse: next_orelse,
            }] => {
                self.indent += 1;
                self.write_body(body, scope)?;
                self.indent -= 1;
                self.write_if("} else ", next_test, next_body, next_orelse, scope)
            }
            _ => {
                self.write_block(body, scope, "} else {")?;
                self.write_block(orelse, scope, "}")
            }
        }
    }
}

impl Default for JavaWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// First wrapper name not taken by a class of the module.
fn wrapper_name(module: &[Node]) -> String {
    let taken = |candidate: &str| {
        module
            .iter()
            .any(|item| matches!(item, Node::Class { name, .. } if name == candidate))
    };
    WRAPPER_CLASSES
        .into_iter()
        .find(|candidate| !taken(*candidate))
        .map_or_else(|| format!("{}Wrapper", WRAPPER_CLASSES[1]), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::BinaryOp;

    fn add() -> Node {
        Node::function(
            "add",
            vec![Param::new("a"), Param::with_default("b", "0")],
            vec![Node::return_stmt(Some(Node::binary(
                Node::name("a"),
                BinaryOp::Add,
                Node::name("b"),
            )))],
        )
    }

    #[test]
    fn test_module_wrapper() {
        let module = Node::module(vec![
            add(),
            Node::assign(
                Node::name("total"),
                Node::call(Node::name("add"), vec![Node::int(1), Node::int(2)]),
            ),
            Node::call(Node::name("System.out.println"), vec![Node::name("total")]),
        ]);
        insta::assert_snapshot!(JavaWriter::emit(&module).unwrap(), @r"
        public class Main {
            public static Object add(Object a, Object b) {
                return a + b;
            }

            public static void main(String[] args) {
                Object total = add(1, 2);
                System.out.println(total);
            }
        }
        ");
    }

    #[test]
    fn test_classes_stay_top_level() {
        let module = Node::module(vec![Node::class(
            "Point",
            vec![
                Node::assign(Node::name("x"), Node::int(0)),
                Node::function(
                    "getX",
                    vec![],
                    vec![Node::return_stmt(Some(Node::name("this.x")))],
                ),
            ],
        )]);
        insta::assert_snapshot!(JavaWriter::emit(&module).unwrap(), @r"
        class Point {
            Object x = 0;

            public Object getX() {
                return this.x;
            }
        }
        ");
    }

    #[test]
    fn test_wrapper_avoids_class_named_main() {
        let module = Node::module(vec![
            Node::class("Main", vec![]),
            Node::call(Node::name("run"), vec![]),
        ]);
        let output = JavaWriter::emit(&module).unwrap();
        assert!(output.starts_with("class Main {\n}\n\npublic class Snippet {\n"));
    }

    #[test]
    fn test_hoisted_locals_and_loops() {
        let function = Node::function(
            "sum",
            vec![Param::new("n")],
            vec![
                Node::for_range(
                    Node::name("i"),
                    Node::name("n"),
                    vec![Node::assign(Node::name("last"), Node::name("i"))],
                ),
                Node::return_stmt(Some(Node::name("last"))),
            ],
        );
        insta::assert_snapshot!(JavaWriter::emit(&function).unwrap(), @r"
        public static Object sum(Object n) {
            Object last = null;
            for (int i = 0; i < n; i++) {
                last = i;
            }
            return last;
        }
        ");
    }

    #[test]
    fn test_literals() {
        assert_eq!(JavaWriter::emit(&Node::string("hello")).unwrap(), "\"hello\"");
        assert_eq!(JavaWriter::emit(&Node::int(3_000_000_000)).unwrap(), "3000000000L");
        assert_eq!(JavaWriter::emit(&Node::null()).unwrap(), "null");
    }

    #[test]
    fn test_nested_function_is_a_fault() {
        let outer = Node::function("outer", vec![], vec![add()]);
        assert_eq!(
            JavaWriter::emit(&outer),
            Err(GenerateError::Fault {
                node: "Function",
                position: Position::Statement,
            })
        );
    }
}
