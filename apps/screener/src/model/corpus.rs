use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A single labeled résumé excerpt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledExample {
    pub category: String,
    pub resume: String,
}

impl LabeledExample {
    fn new(category: &str, resume: &str) -> Self {
        Self {
            category: category.to_string(),
            resume: resume.to_string(),
        }
    }
}

/// The built-in synthetic training set: three excerpts per role category.
pub fn builtin_corpus() -> Vec<LabeledExample> {
    [
        ("Data Science", "Data scientist with experience in machine learning, python, sql, and deep learning. Worked on NLP projects."),
        ("Data Science", "Experienced data analyst skilled in python, pandas, numpy and scikit-learn. Expertise in data visualization."),
        ("Data Science", "Machine learning engineer with focus on computer vision and neural networks using pytorch and tensorflow."),
        ("Web Designing", "Creative web designer with skills in HTML, CSS, JavaScript, and Figma. UI/UX design experience."),
        ("Web Designing", "Front-end developer proficient in React, Tailwind CSS, and web page performance optimization."),
        ("Web Designing", "Web designer specializing in responsive layouts, bootstrap, and modern graphic design tools."),
        ("Java Developer", "Java developer with expertise in Spring Boot, Hibernate, and Microservices architecture."),
        ("Java Developer", "Senior backend engineer skilled in Java, SQL, and enterprise application development."),
        ("Java Developer", "Software developer proficient in Java, J2EE, and Maven for high-scale applications."),
        ("HR", "HR professional with experience in recruitment, employee relations, and talent management."),
        ("HR", "Human resources manager skilled in payroll, performance appraisal, and corporate communications."),
        ("HR", "Talent acquisition specialist with focus on technical hiring and employee onboarding."),
        ("Sales", "Sales executive with a proven track record in business development and client relationship management."),
        ("Sales", "Passionate sales manager skilled in market research, strategic planning, and revenue growth."),
        ("Sales", "Business development associate with expertise in B2B sales and lead generation."),
        ("Mechanical Engineer", "Mechanical engineer experienced in CAD, SolidWorks, and manufacturing processes."),
        ("Mechanical Engineer", "Design engineer specializing in thermodynamics, automotive systems, and structural analysis."),
        ("Mechanical Engineer", "Mechanical maintenance engineer with focus on industrial machinery and robotics."),
        ("Python Developer", "Python developer skilled in Django, Flask, and REST APIs. Strong algorithmic background."),
        ("Python Developer", "Full stack python developer proficient in scripting, automation, and database management."),
        ("Python Developer", "Backend developer with expertise in Python, SQLAlchemy, and cloud deployment."),
    ]
    .into_iter()
    .map(|(category, resume)| LabeledExample::new(category, resume))
    .collect()
}

/// Loads a corpus from a JSON array of `{ "category", "resume" }` objects.
pub fn load_corpus(path: &Path) -> Result<Vec<LabeledExample>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Corpus file {} is not a valid example list", path.display()))
}
