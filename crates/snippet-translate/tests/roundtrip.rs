//! Parse -> generate -> parse must give a structurally equal tree.

#![cfg(all(
    feature = "grammar-python",
    feature = "grammar-javascript",
    feature = "grammar-java"
))]

use snippet_translate::{Language, Node, StructureEq, Translator};

fn assert_roundtrip(source: &str, language: Language) -> Node {
    let translator = Translator::new();
    let first = translator.parse(source, language).expect("parse failed");
    let generated = translator.generate(&first, language).expect("generate failed");
    let second = translator
        .parse(&generated, language)
        .unwrap_or_else(|err| panic!("generated {language} does not parse: {err}\n{generated}"));
    assert!(
        first.structure_eq(&second),
        "{language} round-trip changed the tree\n--- generated ---\n{generated}\n--- first ---\n{first:#?}\n--- second ---\n{second:#?}"
    );
    first
}

#[test]
fn python() {
    let source = "\
def check(x, limit=10):
    total = 0
    for i in range(limit):
        total += i
    while total > 100:
        total = total - 1
    if x > 0:
        return \"positive\"
    elif x < 0:
        return \"negative\"
    else:
        return None

class Counter:
    count = 0

    def inc(self, step=1):
        self.count = self.count + step
";
    let ir = assert_roundtrip(source, Language::Python);
    let Some([check, counter]) = ir.module_body() else {
        panic!("expected two definitions: {ir:#?}");
    };

    let Node::Function { body, .. } = check else {
        panic!("expected Function, got {}", check.tag());
    };
    assert!(matches!(
        body.as_slice(),
        [Node::Assign { .. }, Node::For { body: loop_body, .. }, Node::While { body: while_body, .. }, Node::If { .. }]
            if matches!(loop_body.as_slice(), [Node::Assign { .. }])
                && matches!(while_body.as_slice(), [Node::Assign { .. }])
    ), "{body:#?}");

    let Node::Class { body: members, .. } = counter else {
        panic!("expected Class, got {}", counter.tag());
    };
    assert!(matches!(
        members.as_slice(),
        [Node::Assign { .. }, Node::Function { body: inc, .. }]
            if matches!(inc.as_slice(), [Node::Assign { .. }])
    ), "{members:#?}");
}

#[test]
fn javascript() {
    let source = "\
function check(x, limit = 10) {
  let total = 0;
  for (let i = 0; i < limit; i++) {
    total += i;
  }
  if (x > 0) {
    return \"positive\";
  } else if (x < 0) {
    return \"negative\";
  }
  return null;
}

class Counter {
  count = 0;
  inc(step) {
    this.count = this.count + step;
  }
}

let label;
if (check(1) === \"positive\") {
  label = 2.5;
}
";
    assert_roundtrip(source, Language::JavaScript);
}

#[test]
fn java() {
    let source = "\
class Counter {
    int count = 0;

    int inc(int step) {
        for (int i = 0; i < step; i++) {
            count = count + 1;
        }
        if (count > 10) {
            return count;
        } else {
            return 0;
        }
    }
}
";
    assert_roundtrip(source, Language::Java);
}

#[test]
fn java_wrapper_class() {
    let source = "\
public class Main {
    public static Object twice(Object n) {
        return n * 2;
    }

    public static void main(String[] args) {
        Object x = twice(21);
        System.out.println(x);
    }
}
";
    let ir = assert_roundtrip(source, Language::Java);
    assert!(matches!(
        ir.module_body(),
        Some([Node::Function { .. }, Node::Assign { .. }, Node::Call { .. }])
    ));
}

#[test]
fn across_languages() {
    // Python -> JavaScript -> Python keeps the shape of the supported subset.
    let source = "\
def area(w, h):
    result = w * h
    if result > 100:
        result = 100
    return result
";
    let translator = Translator::new();
    let original = translator.parse(source, Language::Python).unwrap();
    let js = translator.generate(&original, Language::JavaScript).unwrap();
    let back = translator.parse(&js, Language::JavaScript).unwrap();
    assert!(original.structure_eq(&back), "{js}");
}
