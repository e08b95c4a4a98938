use indoc::{formatdoc, indoc};

/// Upload form served at the UI root
pub const UPLOAD_FORM: &str = indoc! {r#"
    <!DOCTYPE html>
    <html lang="en">
    <head>
      <meta charset="UTF-8">
      <meta name="viewport" content="width=device-width, initial-scale=1.0">
      <title>Whisper Transcription</title>
      <style>
        body { font-family: sans-serif; padding: 2rem; background: #f0f2f5; }
        h2 { color: #333; }
        form { background: white; padding: 2rem; border-radius: 8px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }
        input[type=file], input[type=submit] { display: block; margin: 1rem 0; padding: 0.5rem; }
        #processing { color: #007bff; margin-top: 1rem; display: none; }
      </style>
      <script>
        function showProcessing() {
          document.getElementById("processing").style.display = "block";
        }
      </script>
    </head>
    <body>
      <h2>Upload Audio File for Transcription</h2>
      <form action="/transcribe/upload" method="post" enctype="multipart/form-data" onsubmit="showProcessing()">
        <input type="file" name="file" accept="audio/*" required>
        <input type="submit" value="Upload">
      </form>
      <div id="processing">Processing...</div>
    </body>
    </html>
"#};

/// Minimal page reporting a failed upload
pub fn error_page(message: &str) -> String {
    format!("<html><body><h3>{}</h3></body></html>", escape(message))
}

/// Transcript page with copy and back buttons
pub fn result_page(text: &str) -> String {
    let text = escape(text);

    formatdoc! {r#"
        <html>
          <head>
            <meta charset="UTF-8">
            <title>Transcription Result</title>
            <style>
              body {{ font-family: sans-serif; padding: 2rem; background: #f0f2f5; }}
              .container {{ background: white; padding: 2rem; border-radius: 8px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }}
              .buttons {{ margin-top: 1rem; }}
              button {{ padding: 0.5rem 1rem; font-size: 1rem; }}
              .text-block {{ white-space: pre-wrap; word-wrap: break-word; background: #f7f7f7; padding: 1rem; border-radius: 5px; }}
            </style>
            <script>
              function copyText() {{
                const text = document.getElementById("transcription-raw").value;
                navigator.clipboard.writeText(text).then(() => {{
                  alert("Copied to clipboard!");
                }}, () => {{
                  alert("Failed to copy text.");
                }});
              }}
            </script>
          </head>
          <body>
            <div class="container">
              <h2>Transcription Result</h2>
              <div class="text-block" id="transcription-html">{text}</div>
              <textarea id="transcription-raw" style="display:none">{text}</textarea>
              <div class="buttons">
                <button onclick="copyText()">Copy</button>
                <button onclick="history.back()">Back</button>
              </div>
            </div>
          </body>
        </html>
    "#, text = text}
}

/// Escape text for element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
