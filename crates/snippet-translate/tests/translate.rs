//! End-to-end translations through the built-in grammars.

#![cfg(all(
    feature = "grammar-python",
    feature = "grammar-javascript",
    feature = "grammar-java"
))]

use snippet_translate::{Language, Node, TranslateError, UnsupportedLanguage, translate};

const ADD_PY: &str = "def add(a, b=0):\n    return a + b\n";

const CHECK_PY: &str = "\
def check(x):
    if x > 0:
        return \"positive\"
    else:
        return \"non-positive\"
";

mod scenarios {
    use super::*;

    #[test]
    fn python_function_to_javascript() {
        let js = translate(ADD_PY, "py", "js").unwrap();
        assert!(js.contains("function add(a, b = 0)"));
        assert!(js.contains("return a + b;"));
        insta::assert_snapshot!(js, @r"
        function add(a, b = 0) {
          return a + b;
        }
        ");
    }

    #[test]
    fn python_function_to_java() {
        let java = translate(ADD_PY, "py", "java").unwrap();
        assert!(java.contains("public static Object add(Object a, Object b)"));
        assert!(java.contains("return a + b;"));
        insta::assert_snapshot!(java, @r"
        public class Main {
            public static Object add(Object a, Object b) {
                return a + b;
            }
        }
        ");
    }

    #[test]
    fn javascript_function_to_python() {
        let py = translate("function add(a, b = 0) {\n  return a + b;\n}\n", "js", "py").unwrap();
        assert!(py.contains("def add(a, b=0):"));
        assert!(py.contains("return a + b"));
    }

    #[test]
    fn python_if_else_to_javascript() {
        let js = translate(CHECK_PY, "py", "js").unwrap();
        assert!(js.contains("if (x > 0)"));
        assert!(js.contains("return \"positive\";"));
        assert!(js.contains("else"));
        insta::assert_snapshot!(js, @r#"
        function check(x) {
          if (x > 0) {
            return "positive";
          } else {
            return "non-positive";
          }
        }
        "#);
    }

    #[test]
    fn string_literals_keep_double_quotes() {
        let java = translate(CHECK_PY, "py", "java").unwrap();
        assert!(java.contains("return \"positive\";"));
        let js = translate("greeting = 'hello'\n", "py", "js").unwrap();
        assert_eq!(js, "let greeting = \"hello\";\n");
    }

    #[test]
    fn precedence_without_extra_parentheses() {
        let js = translate("x = a + b * 2\n", "py", "js").unwrap();
        assert_eq!(js, "let x = a + b * 2;\n");
        let js = translate("x = (a + b) * 2\n", "py", "js").unwrap();
        assert_eq!(js, "let x = (a + b) * 2;\n");
    }

    #[test]
    fn java_class_to_python() {
        let source = "\
class Counter {
    int count = 0;
    void inc(int step) {
        count += step;
    }
}
";
        let py = translate(source, "java", "py").unwrap();
        insta::assert_snapshot!(py, @r"
        class Counter:
            count = 0

            def inc(step):
                count = count + step
        ");
    }

    #[test]
    fn counted_loops_across_languages() {
        let source = "for (let i = 0; i < 3; i++) {\n  console.log(i);\n}\n";
        let py = translate(source, "js", "py").unwrap();
        assert_eq!(py, "for i in range(3):\n    console.log(i)\n");

        let java = translate("for i in range(n):\n    total = i\n", "py", "java").unwrap();
        insta::assert_snapshot!(java, @r"
        public class Main {
            public static void main(String[] args) {
                Object total = null;
                for (int i = 0; i < n; i++) {
                    total = i;
                }
            }
        }
        ");
    }
}

mod fallback {
    use super::*;
    use snippet_translate::read_python;

    #[test]
    fn unsupported_statements_vanish_in_order() {
        let source = "a = 1\nimport os\nb = 2\nwith open(p) as f:\n    pass\nc = 3\n";
        let js = translate(source, "py", "js").unwrap();
        assert_eq!(js, "let a = 1;\nlet b = 2;\nlet c = 3;\n");
    }

    #[test]
    fn unsupported_expressions_become_null() {
        let js = translate("x = [1, 2, 3]\n", "py", "js").unwrap();
        assert_eq!(js, "let x = null;\n");
        let py = translate("let f = (a) => a;\n", "js", "py").unwrap();
        assert_eq!(py, "f = None\n");
    }

    #[test]
    fn other_iterables_get_placeholder_bound() {
        let js = translate("for item in items:\n    use(item)\n", "py", "js").unwrap();
        assert_eq!(js, "for (let item = 0; item < 10; item++) {\n  use(item);\n}\n");
    }

    #[test]
    fn bare_return_stays_bare() {
        let ir = read_python("def f():\n    return\n").unwrap();
        assert_eq!(
            ir,
            Node::module(vec![Node::function("f", vec![], vec![Node::return_stmt(None)])])
        );
    }
}

mod errors {
    use super::*;
    use snippet_translate::ParseError;

    #[test]
    fn unknown_target_tag() {
        assert_eq!(
            translate(ADD_PY, "py", "ruby"),
            Err(TranslateError::UnsupportedLanguage(UnsupportedLanguage("ruby".into())))
        );
    }

    #[test]
    fn unknown_source_tag_is_checked_before_parsing() {
        // Not valid in any language; the tag error must win.
        assert_eq!(
            translate("def (", "cocoa", "js"),
            Err(TranslateError::UnsupportedLanguage(UnsupportedLanguage("cocoa".into())))
        );
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let err = translate("function f( {", "javascript", "python").unwrap_err();
        assert!(matches!(err, TranslateError::Parse(ParseError::Syntax { line: 1, .. })));
    }

    #[test]
    fn full_names_are_accepted() {
        for language in Language::ALL {
            assert!(translate("", language.name(), "py").is_ok());
        }
    }
}

mod idempotence {
    use super::*;
    use snippet_translate::{Translator, read_javascript};

    #[test]
    fn generating_twice_gives_identical_text() {
        let ir = read_javascript(
            "function f(n) {\n  let t = 0;\n  while (t < n) {\n    t += 2;\n  }\n  return t;\n}\n",
        )
        .unwrap();
        let translator = Translator::new();
        for language in Language::ALL {
            let first = translator.generate(&ir, language).unwrap();
            let second = translator.generate(&ir, language).unwrap();
            assert_eq!(first, second, "{language} output differs between runs");
        }
    }
}
