// Recruitment-domain LLM prompt templates.

pub const RESUME_SCREENING_SYSTEM: &str = "\
You are an expert HR recruiter specialized in résumé analysis. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

pub const RESUME_SCREENING_PROMPT: &str = r#"Analyze the following résumé and extract a structured screening.

RESUME:
{resume_text}

{job_description_block}

OUTPUT SCHEMA (return exactly this structure):
{
  "skills": ["technical and soft skills"],
  "experience_years": number (estimated years of experience),
  "education": "degrees and institutions",
  "summary": "2-3 sentence professional summary",
  "score": number (0-100, overall profile quality),
  "job_match_score": number (0-100, fit for the job; 0 when no job description supplied),
  "strengths": ["candidate strengths"],
  "areas_for_improvement": ["areas to improve"]
}

RULES:
1. Estimate honestly from the résumé text; never inflate scores.
2. Return ONLY the JSON object — nothing else, no code fences."#;

pub const INTERVIEW_QUESTIONS_SYSTEM: &str = "\
You are an expert HR interviewer. Generate relevant, professional interview questions. \
You MUST respond with a valid JSON array of strings only — no markdown fences.";

pub const INTERVIEW_QUESTIONS_PROMPT: &str = r#"Generate 8-10 relevant interview questions for:

JOB TITLE: {job_title}

CANDIDATE PROFILE:
{candidate_profile}

Include:
- 2-3 technical questions specific to the role
- 2-3 behavioral questions
- 2-3 questions about past experience
- 1-2 questions about motivation and goals

Return ONLY a JSON array of question strings — nothing else, no code fences."#;

pub const JOB_DESCRIPTION_SYSTEM: &str = "\
You are an expert job-description writer. Produce professional, attractive content. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

pub const JOB_DESCRIPTION_PROMPT: &str = r#"Write a professional job description for:

TITLE: {job_title}
DEPARTMENT: {department}
REQUIREMENTS: {requirements}

OUTPUT SCHEMA (return exactly this structure):
{
  "description": "detailed job description",
  "responsibilities": ["main responsibilities"],
  "qualifications": ["required qualifications"],
  "preferred_skills": ["preferred skills"],
  "keywords": ["keywords for AI matching"]
}

Return ONLY the JSON object — nothing else, no code fences."#;
