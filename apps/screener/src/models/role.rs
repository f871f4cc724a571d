use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of job-role categories a résumé can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleCategory {
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Web Designing")]
    WebDesigning,
    #[serde(rename = "Java Developer")]
    JavaDeveloper,
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "Sales")]
    Sales,
    #[serde(rename = "Mechanical Engineer")]
    MechanicalEngineer,
    #[serde(rename = "Python Developer")]
    PythonDeveloper,
}

#[derive(Debug, Error)]
#[error("unknown role category '{0}'")]
pub struct UnknownRole(pub String);

impl RoleCategory {
    pub const ALL: [RoleCategory; 7] = [
        RoleCategory::DataScience,
        RoleCategory::WebDesigning,
        RoleCategory::JavaDeveloper,
        RoleCategory::Hr,
        RoleCategory::Sales,
        RoleCategory::MechanicalEngineer,
        RoleCategory::PythonDeveloper,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoleCategory::DataScience => "Data Science",
            RoleCategory::WebDesigning => "Web Designing",
            RoleCategory::JavaDeveloper => "Java Developer",
            RoleCategory::Hr => "HR",
            RoleCategory::Sales => "Sales",
            RoleCategory::MechanicalEngineer => "Mechanical Engineer",
            RoleCategory::PythonDeveloper => "Python Developer",
        }
    }

    /// Representative skill terms for the role, used as the match-score baseline.
    pub fn keyword_profile(self) -> &'static str {
        match self {
            RoleCategory::DataScience => {
                "Machine Learning, Python, SQL, Deep Learning, Statistics, Data Analysis, NLP, R, Neural Networks"
            }
            RoleCategory::WebDesigning => {
                "HTML, CSS, JavaScript, Figma, UI/UX, Adobe XD, Responsive Design, Bootstrap, Tailwind, Front-end"
            }
            RoleCategory::JavaDeveloper => {
                "Java, Spring Boot, Hibernate, Microservices, SQL, J2EE, Maven, Backend development"
            }
            RoleCategory::Hr => {
                "Recruitment, Employee Relations, Talent Management, Payroll, Performance Appraisal, Corporate Communication"
            }
            RoleCategory::Sales => {
                "Business Development, Sales, Client Relationships, Market Research, B2B, Lead Generation, CRM"
            }
            RoleCategory::MechanicalEngineer => {
                "CAD, SolidWorks, Manufacturing, Thermodynamics, Automotive, Robotics, Structural Analysis"
            }
            RoleCategory::PythonDeveloper => {
                "Python, Django, Flask, REST API, SQL, Backend, Algorithms, Scripting, Automation"
            }
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoleCategory {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleCategory::ALL
            .into_iter()
            .find(|r| r.label() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
