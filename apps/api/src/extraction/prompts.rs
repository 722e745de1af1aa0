// LLM prompt constants for attribute extraction and skill matching.
// Templates carry `{placeholders}` that callers replace before sending.

/// System prompt for both attribute extractors.
pub const EXTRACT_SYSTEM: &str =
    "You are an intelligent recruitment document parser. \
    You extract facts exactly as written and never invent values. \
    You MUST respond with valid JSON only. \
    Do NOT include explanations or apologies.";

/// JD extraction prompt. Replace `{rules}` and `{jd_text}` before sending.
pub const JD_EXTRACT_PROMPT_TEMPLATE: &str = r#"You are an intelligent job description parser.
Extract the following details strictly into the JSON schema given below:

- Key Skills: return ONLY technical skills (programming languages, frameworks, libraries, ML/DL algorithms, cloud tools, APIs, software platforms) as a comma-separated string.
  Do NOT include company names, soft skills, domains, business terms, responsibilities, or generic words like "cloud", "solutions", "predictive models".
- Years of Experience: extract if explicitly mentioned, else "".
- Notice Period: extract if mentioned, else "".
- Location: extract if mentioned, else "".
- Other Requirements:
  - Degrees: required or preferred degrees.
  - Courses: certifications or courses.
  - Interpersonal Skills: soft skills such as communication or leadership.
  - Awards: required awards or recognitions.
  - Notes: domain knowledge or industry-specific needs not covered above.

{rules}

{
  "Key Skills": "",
  "Years of Experience": "",
  "Notice Period": "",
  "Location": "",
  "Other Requirements": {
    "Degrees": [],
    "Courses": [],
    "Interpersonal Skills": [],
    "Awards": [],
    "Notes": ""
  }
}

Job Description:
{jd_text}"#;

/// Resume extraction prompt. Replace `{rules}`, `{experience}` and
/// `{resume_text}` before sending.
pub const RESUME_EXTRACT_PROMPT_TEMPLATE: &str = r#"You are an intelligent resume parser.
Extract the following details strictly into the JSON schema given below:

- Key Skills: return as a comma-separated string.
- Notice Period: if not found, leave empty.
- Location: if not found, leave empty.
- Degrees: list with objects {"degree", "institute", "duration", "CGPA/grade"}.
- Courses: list with objects {"course", "provider"}.
- Interpersonal Skills: list of soft skills (leadership, teamwork, communication, confidence, etc.).
- Awards: list of awards, honors, recognitions.

{rules}

{
  "Key Skills": "",
  "Notice Period": "",
  "Location": "",
  "Degrees": [],
  "Courses": [],
  "Interpersonal Skills": [],
  "Awards": [],
  "Years of Experience": "{experience}"
}

Resume Text:
{resume_text}"#;

/// System prompt for semantic skill matching.
pub const SKILL_MATCH_SYSTEM: &str = r#"You are an expert recruiter.
Your task is to identify which skills from the Job Description are represented in the Resume.

A Job Description skill is a match if the resume skill is:
- The exact same skill.
- An acronym or full form (e.g., 'LLM' and 'Large Language Model').
- A synonym, equivalent term, or related technology.
- A broader category or a sub-skill.

Do not match unrelated skills (e.g., 'Java' is not 'JavaScript').
Only return JD skills that matched. No resume skills in the output.

Output strictly as a JSON list of JD skills."#;

/// Skill matching prompt. Replace `{jd_skills}` and `{resume_skills}`.
pub const SKILL_MATCH_PROMPT_TEMPLATE: &str = r#"Job Description Skills:
{jd_skills}

Resume Skills:
{resume_skills}

Output:"#;
