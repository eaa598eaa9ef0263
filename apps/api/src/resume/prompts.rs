// Resume parsing prompt template.

pub const RESUME_PARSE_PROMPT: &str = r#"
You are an AI assistant that extracts structured information from resumes.
Extract the following fields: 
- Name 
- Email 
- Phone Number 
- Skills 
- Years of Experience 
- Education 
- Current/Last Job 
- Companies Worked At 
- LinkedIn (if present) 
- Certifications (if present) 
- Location (if present)

Return ONLY valid JSON in this format:
{
  "Name": "...",
  "Email": "...",
  "Phone Number": "...",
  "Skills": ["..."],
  "Years of Experience": "...",
  "Education": ["..."],
  "Current/Last Job": "...",
  "Companies Worked At": ["..."],
  "LinkedIn": "...",
  "Certifications": ["..."],
  "Location": "..."
}

Resume Text:
{resume_text}
"#;

/// Embeds the resume text verbatim into the fixed prompt.
pub fn build_resume_prompt(resume_text: &str) -> String {
    RESUME_PARSE_PROMPT.replace("{resume_text}", resume_text)
}
