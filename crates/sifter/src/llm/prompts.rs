//! Prompt templates for assistant tasks.

/// System prompt for the cleaning manual.
pub const CLEANING_SYSTEM: &str = r#"You are an expert data-cleaning assistant. Return a clean, readable Markdown manual of issues.
For each issue, follow EXACTLY this structure and formatting (use headings, bold labels, and fenced code):

### Issue 1: <Concise Title>

**Why this needs to be fixed:**
<Short, direct explanation in 1-3 sentences>

**Code:**
```python
<Pure, runnable Python code only. No comments outside code.>
```

**Result:**
<Expected outcome in 1-2 sentences>

Then continue with '### Issue 2:', etc. Do not include extra sections or raw prose."#;

/// System prompt for the data story.
pub const STORY_SYSTEM: &str = "You are a senior data analyst and an expert storyteller. \
Your task is to analyze the provided dataset summary and write a compelling, easy-to-understand \
narrative for a non-technical audience. Focus on the key insights, trends, potential outliers, \
and interesting relationships between variables. Structure your story logically. Start with a \
high-level overview, then dive into specific, noteworthy findings. Conclude with a summary of \
the most important takeaways or potential next steps for analysis. Do NOT produce Python code. \
Generate a narrative story only.";

/// System prompt for visualization code.
pub const VISUALIZATION_SYSTEM: &str = "You are a data visualization expert. Your task is to \
suggest a relevant and insightful data visualization based on the provided dataset columns and \
head. Your output must be a single, clean block of executable Python code using seaborn or \
matplotlib. The code should be complete and ready to run, assuming a pandas DataFrame named `df` \
already exists. It must include all necessary imports. Do not add any explanation, narrative, or \
markdown fences. Do NOT include `pd.read_csv()`. Just the plotting code.";

/// System prompt for dataset chat.
pub const CHAT_SYSTEM: &str = "You are a friendly and helpful data analyst chatbot. Your role \
is to assist users in understanding and exploring their dataset. You have access to the \
dataset's column names and the first few rows. When a user asks for a visualization, provide \
the Python code (using seaborn or matplotlib) in a clean, executable block. Assume the data is \
in a pandas DataFrame named `df`. Do NOT include `pd.read_csv()` in your code. For other \
questions, provide clear, concise answers based on the provided data context.";

/// Render a column list for prompts.
fn column_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Build the user prompt for the cleaning manual.
pub fn cleaning_prompt(issues_json: &str, columns: &[String]) -> String {
    format!(
        r#"Dataset Analysis Context:
Columns: {}
Data Issues Found: {}

Produce the Markdown manual now. Start directly with '### Issue 1:'."#,
        column_list(columns),
        issues_json
    )
}

/// Build the user prompt for the data story.
pub fn story_prompt(head: &str, describe: &str, columns: &[String]) -> String {
    format!(
        r#"Here is a summary of the dataset I am analyzing:

First 5 rows:
{}

Descriptive Statistics:
{}

Columns: {}

Please generate a data story based on this information."#,
        head,
        describe,
        column_list(columns)
    )
}

/// Build the user prompt for visualization code.
pub fn visualization_prompt(columns: &[String], head: &str) -> String {
    format!(
        r#"Based on the following dataset information, please provide the Python code for a single, meaningful visualization. Assume the data is already loaded into a pandas DataFrame called `df`.

Columns: {}

First 5 rows:
{}

Provide only the runnable Python code for the plot. Do not include `pd.read_csv()`."#,
        column_list(columns),
        head
    )
}

/// Build the user prompt for a chat turn, replaying prior turns.
pub fn chat_prompt(
    message: &str,
    history: &[(String, String)],
    columns: &[String],
    head: &str,
) -> String {
    let transcript = history
        .iter()
        .map(|(user, assistant)| format!("User: {}\nAssistant: {}", user, assistant))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Here is the context for our conversation:

Dataset Columns: {}
First 5 rows of data:
{}

--- Conversation History ---
{}

--- Current Question ---
User: {}
Assistant:"#,
        column_list(columns),
        head,
        transcript,
        message
    )
}
