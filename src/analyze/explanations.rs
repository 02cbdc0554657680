//! Line-level explanations of common constructs.

use super::Explanation;

/// Upper bound on explanations kept per analysis.
pub const MAX_EXPLANATIONS: usize = 15;

/// A construct category with its canned explanation.
pub struct ExplanationRule {
    pub category: &'static str,
    pub title: &'static str,
    pub explanation: &'static str,
    pub concepts: &'static [&'static str],
    pub matches: fn(&str) -> bool,
}

impl ExplanationRule {
    pub fn explain(&self, line_number: usize, trimmed: &str) -> Option<Explanation> {
        if !(self.matches)(trimmed) {
            return None;
        }
        Some(Explanation {
            id: format!("explanation-{}-{}", line_number, self.category),
            line: line_number,
            code: trimmed.to_string(),
            explanation: self.explanation.to_string(),
            concepts: self.concepts.iter().map(|c| c.to_string()).collect(),
        })
    }
}

/// Explanation categories, in evaluation order.
pub static EXPLANATION_RULES: &[ExplanationRule] = &[
    ExplanationRule {
        category: "function",
        title: "Function definition",
        explanation: "This line defines a function, which is a reusable block of code that performs a specific task. Functions help organize code, reduce repetition, and make programs more modular and maintainable.",
        concepts: &["Functions", "Code Organization", "Reusability", "Modularity"],
        matches: |line| line.contains("function") || line.contains("def "),
    },
    ExplanationRule {
        category: "conditional",
        title: "Conditional statement",
        explanation: "This is a conditional statement that executes different code paths based on whether a condition evaluates to true or false. It's fundamental for creating decision-making logic in programs.",
        concepts: &["Conditional Logic", "Control Flow", "Boolean Logic", "Decision Making"],
        matches: |line| line.contains("if ") || line.contains("if("),
    },
    ExplanationRule {
        category: "loop",
        title: "Loop statement",
        explanation: "This is a loop statement that repeats a block of code multiple times. Loops are essential for processing collections of data, performing repetitive tasks, and implementing algorithms efficiently.",
        concepts: &["Loops", "Iteration", "Control Flow", "Repetition"],
        matches: |line| line.contains("for ") || line.contains("while "),
    },
    ExplanationRule {
        category: "variable",
        title: "Variable declaration",
        explanation: "This line declares a variable, which is a named storage location that holds a value. Variables are fundamental building blocks that allow programs to store, retrieve, and manipulate data.",
        concepts: &["Variables", "Data Storage", "Memory Management", "Scope"],
        matches: |line| line.contains("const ") || line.contains("let ") || line.contains("var "),
    },
    ExplanationRule {
        category: "class",
        title: "Class definition",
        explanation: "This line defines a class, which is a blueprint for creating objects. Classes encapsulate data and behavior, enabling object-oriented programming principles like inheritance and polymorphism.",
        concepts: &["Classes", "Object-Oriented Programming", "Encapsulation", "Objects"],
        matches: |line| line.contains("class "),
    },
    ExplanationRule {
        category: "import",
        title: "Import statement",
        explanation: "This line imports external modules or libraries, allowing you to use pre-written code and functionality. This promotes code reuse and helps organize large applications.",
        concepts: &["Modules", "Imports", "Code Reuse", "Dependencies"],
        matches: |line| line.contains("import ") || line.contains("from ") || line.contains("require("),
    },
];

/// Whether a trimmed line is eligible for explanations at all.
pub fn is_explainable(trimmed: &str) -> bool {
    !trimmed.is_empty() && !trimmed.starts_with("//") && !trimmed.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explain_all(line: &str) -> Vec<Explanation> {
        EXPLANATION_RULES
            .iter()
            .filter_map(|r| r.explain(3, line))
            .collect()
    }

    #[test]
    fn test_function_definition() {
        let found = explain_all("function foo() {}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "explanation-3-function");
        assert_eq!(found[0].code, "function foo() {}");
        assert_eq!(found[0].concepts[0], "Functions");
    }

    #[test]
    fn test_multiple_categories_on_one_line() {
        let found = explain_all("const add = function (a, b) { return a + b; };");
        let categories: Vec<&str> = found
            .iter()
            .map(|e| e.id.rsplit('-').next().unwrap())
            .collect();
        assert_eq!(categories, vec!["function", "variable"]);
    }

    #[test]
    fn test_python_import() {
        let found = explain_all("from os import path");
        assert_eq!(found.len(), 1);
        assert!(found[0].concepts.contains(&"Imports".to_string()));
    }

    fn categories(line: &str) -> Vec<String> {
        explain_all(line)
            .into_iter()
            .map(|e| e.id.trim_start_matches("explanation-3-").to_string())
            .collect()
    }

    #[test]
    fn test_class_definition() {
        let found = explain_all("class Counter extends Base {");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "explanation-3-class");
        assert!(found[0].concepts.contains(&"Object-Oriented Programming".to_string()));
    }

    #[test]
    fn test_match_alternatives() {
        assert_eq!(categories("while (queue.length) {"), vec!["loop"]);
        assert_eq!(categories("for item in items:"), vec!["loop"]);
        assert_eq!(categories("if(ready) {"), vec!["conditional"]);
        assert_eq!(categories("def handler(event):"), vec!["function"]);
        assert_eq!(categories("const fs = require('fs');"), vec!["variable", "import"]);
        assert_eq!(categories("let total = 0;"), vec!["variable"]);
        assert!(categories("return total;").is_empty());
    }

    #[test]
    fn test_is_explainable() {
        assert!(is_explainable("x = 1"));
        assert!(!is_explainable(""));
        assert!(!is_explainable("// if (x) {}"));
        assert!(!is_explainable("# for x in y"));
    }
}
