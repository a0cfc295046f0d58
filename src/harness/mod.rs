//! Test program composition
//!
//! Joins a request's imports, function and test into one program and
//! appends a unittest runner for the harness test case class.

use std::path::{Path, PathBuf};

use grader_protocol::TestRequest;

/// Printed to stdout before the unittest runner starts.
pub const RESULTS_START_BANNER: &str = "===== TEST RESULTS START =====";

/// Printed to stdout after the unittest runner returns.
pub const RESULTS_END_BANNER: &str = "===== TEST RESULTS END =====";

/// Identifies one reusable environment: `<data_root>/<language>/envs/<env>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentKey {
    pub language: String,
    pub env: String,
}

impl EnvironmentKey {
    pub fn from_request(request: &TestRequest) -> Self {
        Self {
            language: request.language_key(),
            env: request.env.clone(),
        }
    }

    /// Directory of this environment below `data_root`.
    pub fn path_under(&self, data_root: &Path) -> PathBuf {
        data_root.join(&self.language).join("envs").join(&self.env)
    }
}

/// Runner appended after the test code; `{marker}` is the test case class.
fn runner_footer(marker: &str) -> String {
    format!(
        "\nprint(\"{start}\")\n\
         suite = unittest.TestLoader().loadTestsFromTestCase({marker})\n\
         unittest.TextTestRunner().run(suite)\n\
         print(\"{end}\")\n",
        start = RESULTS_START_BANNER,
        end = RESULTS_END_BANNER,
        marker = marker,
    )
}

/// Compose the program executed for a request.
///
/// `marker` is the name of the unittest case class the test defines.
pub fn compose_program(request: &TestRequest, marker: &str) -> String {
    let imports = request.imports.join("\n");
    let function = request.function.join("\n");
    let test = request.test.join("\n") + &runner_footer(marker);

    format!("\n\n{}\n\n{}\n\n{}", imports, function, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TestRequest {
        TestRequest {
            language: "python 3".to_string(),
            function: vec!["def add(a, b):".to_string(), "    return a + b".to_string()],
            test: vec![
                "class TestProcess(unittest.TestCase):".to_string(),
                "    def test_add(self):".to_string(),
                "        self.assertEqual(add(1, 2), 3)".to_string(),
            ],
            imports: vec!["import unittest".to_string()],
            libraries: vec![],
            env: "e1".to_string(),
        }
    }

    #[test]
    fn test_environment_path() {
        let key = EnvironmentKey::from_request(&request());
        assert_eq!(key.language, "python_3");
        assert_eq!(
            key.path_under(Path::new("data")),
            PathBuf::from("data/python_3/envs/e1")
        );
    }

    #[test]
    fn test_compose_program_order() {
        let program = compose_program(&request(), "TestProcess");

        assert!(program.starts_with("\n\nimport unittest\n\ndef add(a, b):\n    return a + b\n\nclass TestProcess"));
        let import_pos = program.find("import unittest").unwrap();
        let func_pos = program.find("def add").unwrap();
        let test_pos = program.find("class TestProcess").unwrap();
        assert!(import_pos < func_pos && func_pos < test_pos);
    }

    #[test]
    fn test_compose_program_runner_footer() {
        let program = compose_program(&request(), "TestProcess");

        assert!(program.contains("loadTestsFromTestCase(TestProcess)"));
        assert!(program.contains("unittest.TextTestRunner().run(suite)"));
        let start = program.find(RESULTS_START_BANNER).unwrap();
        let end = program.find(RESULTS_END_BANNER).unwrap();
        assert!(start < end);
        assert!(program.find("self.assertEqual").unwrap() < start);
    }

    #[test]
    fn test_compose_program_custom_marker() {
        let program = compose_program(&request(), "HarnessCase");
        assert!(program.contains("loadTestsFromTestCase(HarnessCase)"));
    }
}
