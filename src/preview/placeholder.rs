//! Fixed document shown when the preview cannot be composed.

pub const PREVIEW_ERROR_MESSAGE: &str = "Unable to render preview";

const ERROR_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <title>Preview Error</title>
    <style>
      body {
        font-family: Arial, sans-serif;
        padding: 20px;
        background: #1a1a1a;
        color: #fff;
        text-align: center;
      }
      .error {
        background: #ff4444;
        padding: 10px;
        border-radius: 5px;
        margin: 20px 0;
      }
    </style>
  </head>
  <body>
    <h3>Preview Error</h3>
    <div class="error">Unable to render preview</div>
    <p>Check the log for details</p>
  </body>
</html>
"#;

/// The styled placeholder document.
pub fn error_document() -> &'static str {
    ERROR_DOCUMENT
}
