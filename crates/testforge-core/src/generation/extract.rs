//! Extracting code from model responses

use crate::generation::types::TestFramework;

/// Pull the test file out of a model response.
///
/// Models usually wrap code in a fenced block, often with prose around it.
/// When fences are present the longest block wins; otherwise the raw text
/// is returned trimmed.
pub fn extract_code(response: &str) -> String {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for line in response.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            match current.take() {
                Some(block) => blocks.push(block),
                // Opening fence; the language tag on this line is dropped
                None => current = Some(String::new()),
            }
            continue;
        }
        if let Some(block) = current.as_mut() {
            block.push_str(line);
            block.push('\n');
        }
    }
    // Unterminated fence: keep what accumulated
    if let Some(block) = current {
        blocks.push(block);
    }

    match blocks.into_iter().max_by_key(|b| b.len()) {
        Some(block) => block.trim_end().to_string() + "\n",
        None => {
            let trimmed = response.trim();
            if trimmed.is_empty() {
                String::new()
            } else {
                trimmed.to_string() + "\n"
            }
        }
    }
}

/// Count test cases in a generated file, per framework convention.
pub fn count_test_cases(code: &str, framework: TestFramework) -> usize {
    match framework {
        TestFramework::Pytest | TestFramework::Unittest => {
            code.lines()
                .filter(|line| {
                    let t = line.trim_start();
                    t.starts_with("def test_") || t.starts_with("async def test_")
                })
                .count()
        }
        TestFramework::Jest => {
            count_calls(code, "test") + count_calls(code, "it")
        }
        TestFramework::Junit => code
            .lines()
            .filter(|line| {
                let t = line.trim_start();
                t.starts_with("@Test") && !t.chars().nth(5).is_some_and(|c| c.is_alphanumeric())
            })
            .count(),
    }
}

/// Count `name(` call sites where `name` stands alone as an identifier.
fn count_calls(code: &str, name: &str) -> usize {
    let mut count = 0;
    let bytes = code.as_bytes();
    let mut start = 0;
    while let Some(pos) = code[start..].find(name) {
        let abs = start + pos;
        let before_ok = abs == 0 || {
            let c = bytes[abs - 1] as char;
            !c.is_alphanumeric() && c != '_' && c != '.'
        };
        let after = abs + name.len();
        let after_ok = bytes.get(after).copied() == Some(b'(');
        if before_ok && after_ok {
            count += 1;
        }
        start = abs + name.len();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_block() {
        let response = "Here are your tests:\n```python\ndef test_add():\n    assert add(1, 2) == 3\n```\nLet me know if you need more.";
        let code = extract_code(response);
        assert_eq!(code, "def test_add():\n    assert add(1, 2) == 3\n");
    }

    #[test]
    fn prefers_the_longest_block() {
        let response = "```bash\npip install pytest\n```\n```python\ndef test_a():\n    pass\n\ndef test_b():\n    pass\n```";
        let code = extract_code(response);
        assert!(code.contains("def test_a"));
        assert!(!code.contains("pip install"));
    }

    #[test]
    fn unfenced_response_is_taken_verbatim() {
        let code = extract_code("def test_x():\n    pass");
        assert_eq!(code, "def test_x():\n    pass\n");
    }

    #[test]
    fn handles_unterminated_fence() {
        let code = extract_code("```python\ndef test_y():\n    pass");
        assert!(code.contains("def test_y"));
    }

    #[test]
    fn counts_pytest_cases() {
        let code = "import pytest\n\ndef test_a():\n    pass\n\nasync def test_b():\n    pass\n\ndef helper():\n    pass\n";
        assert_eq!(count_test_cases(code, TestFramework::Pytest), 2);
    }

    #[test]
    fn counts_jest_cases_without_false_positives() {
        let code = "describe('math', () => {\n  test('adds', () => {});\n  it('subtracts', () => {});\n  await wait(10);\n  submit();\n});\n";
        assert_eq!(count_test_cases(code, TestFramework::Jest), 2);
    }

    #[test]
    fn counts_junit_cases() {
        let code = "@Test\nvoid adds() {}\n\n@Test\nvoid subtracts() {}\n\n@TestFactory\nvoid factory() {}\n";
        assert_eq!(count_test_cases(code, TestFramework::Junit), 2);
    }
}
