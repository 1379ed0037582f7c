//! Canned HTML pages.

/// A Stack Overflow question page with one accepted answer holding a
/// JavaScript one-liner.
pub const STACK_OVERFLOW_ANSWER_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>How do I print to the console? - Stack Overflow</title>
<link rel="canonical" href="https://stackoverflow.com/questions/4743730/how-do-i-print-to-the-console">
</head>
<body>
<div id="question" class="question">
  <div class="s-prose js-post-body">I want to print something. How?</div>
</div>
<div id="answers">
  <div id="answer-4743755" class="answer accepted-answer">
    <div class="answercell post-layout--right">
      <div class="s-prose js-post-body" itemprop="text">
<p>Use the console API:</p>
<pre><code>console.log(&quot;hi&quot;);</code></pre>
<p>It works in every modern browser.</p>
      </div>
    </div>
  </div>
</div>
<footer>stackoverflow.com</footer>
</body>
</html>"#;

/// A GitHub issue whose first comment carries a shell command.
pub const GITHUB_ISSUE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Build fails on nightly · Issue #1234 · example/tool · GitHub</title></head>
<body>
<a href="https://github.com/example/tool/issues/1234">permalink</a>
<div class="comment-body markdown-body js-comment-body">
<p>Run this to reproduce:</p>
<pre><code>cargo build --release</code></pre>
</div>
</body>
</html>"#;

/// A page from an unknown site with a single code block.
pub const BLOG_POST_PAGE: &str = r#"<html><body>
<article>
<h1>Reading files in Python</h1>
<p>The simplest way:</p>
<pre class="highlight">def read_all(path):
    with open(path) as f:
        return f.read()</pre>
</article>
</body></html>"#;

/// A page without any code.
pub const NO_CODE_PAGE: &str =
    "<html><body><h1>Recipes</h1><p>Mix flour and water.</p></body></html>";

/// A search-results page with classic `.g` containers.
pub const SEARCH_RESULTS_PAGE: &str = r#"<html><body>
<div id="search">
  <div class="g">
    <a href="https://stackoverflow.com/questions/4743730/how-do-i-print#:~:text=console"><h3>How do I print</h3></a>
  </div>
  <div class="g">
    <a href="/url?q=relative">relative</a>
    <a href="https://github.com/example/tool/issues/1234"><h3>Build fails</h3></a>
  </div>
  <div class="g">
    <a href="https://www.bbc.co.uk/news"><h3>News</h3></a>
  </div>
  <div class="g">
    <span>No link here</span>
  </div>
</div>
</body></html>"#;

/// A search-results page using the newer `.MjjYud` containers only.
pub const SEARCH_RESULTS_PAGE_MJJYUD: &str = r#"<html><body>
<div class="MjjYud"><a href="https://learn.microsoft.com/en-us/dotnet/csharp/">C# docs</a></div>
<div class="MjjYud"><a href="https://example.org/recipes">Recipes</a></div>
</body></html>"#;
