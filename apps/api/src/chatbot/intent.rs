//! Keyword-based intent detection for the HR assistant.
//!
//! Deterministic and DB-free so detection and suggestion derivation stay
//! unit-testable. Keywords cover both French and English phrasing since the
//! assistant serves a bilingual workforce.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SearchEmployee,
    GetStatistics,
    JobInquiry,
    LeaveInquiry,
    PolicyInquiry,
    TrainingInquiry,
    PayrollInquiry,
    GeneralInquiry,
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}

/// Classifies a user message into an intent. First matching rule wins,
/// checked in priority order.
pub fn detect_intent(message: &str) -> Intent {
    let message = message.to_lowercase();

    if contains_any(&message, &["qui est", "who is", "contact", "téléphone", "email"]) {
        Intent::SearchEmployee
    } else if contains_any(&message, &["combien", "how many", "nombre", "statistique"]) {
        Intent::GetStatistics
    } else if contains_any(&message, &["poste", "job", "recrutement", "candidature"]) {
        Intent::JobInquiry
    } else if contains_any(&message, &["congé", "vacation", "absence", "leave"]) {
        Intent::LeaveInquiry
    } else if contains_any(&message, &["politique", "policy", "règlement", "procedure"]) {
        Intent::PolicyInquiry
    } else if contains_any(
        &message,
        &["formation", "training", "développement", "development"],
    ) {
        Intent::TrainingInquiry
    } else if contains_any(&message, &["salaire", "salary", "paie", "payroll"]) {
        Intent::PayrollInquiry
    } else {
        Intent::GeneralInquiry
    }
}

/// Follow-up suggestions shown next to the assistant's reply.
pub fn suggestions_for(intent: Intent) -> Vec<String> {
    let items: &[&str] = match intent {
        Intent::SearchEmployee => &[
            "Rechercher un employé par nom",
            "Voir l'organigramme",
            "Contacter le service RH",
        ],
        Intent::GetStatistics => &[
            "Voir les statistiques des employés",
            "Consulter les métriques de recrutement",
            "Analyser les performances par département",
        ],
        Intent::JobInquiry => &[
            "Voir les postes ouverts",
            "Postuler à un emploi",
            "Contacter un recruteur",
        ],
        Intent::LeaveInquiry => &[
            "Demander un congé",
            "Vérifier mon solde de congés",
            "Voir le calendrier des congés",
        ],
        Intent::PolicyInquiry => &[
            "Consulter le manuel employé",
            "Voir les politiques RH",
            "Contacter le service juridique",
        ],
        Intent::TrainingInquiry => &[
            "Voir les formations disponibles",
            "S'inscrire à une formation",
            "Consulter mon plan de développement",
        ],
        Intent::PayrollInquiry => &[
            "Voir mes fiches de paie",
            "Mettre à jour mes informations bancaires",
            "Contacter la comptabilité",
        ],
        Intent::GeneralInquiry => &[
            "Poser une question sur les RH",
            "Chercher un employé",
            "Voir les postes disponibles",
            "Consulter les politiques",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_employee_search() {
        assert_eq!(detect_intent("Qui est le manager de l'équipe IT?"), Intent::SearchEmployee);
        assert_eq!(detect_intent("What is the email of John?"), Intent::SearchEmployee);
    }

    #[test]
    fn test_detects_statistics() {
        assert_eq!(detect_intent("Combien d'employés avons-nous?"), Intent::GetStatistics);
        assert_eq!(detect_intent("How many open roles?"), Intent::GetStatistics);
    }

    #[test]
    fn test_detects_job_inquiry() {
        assert_eq!(detect_intent("Y a-t-il un poste ouvert en marketing?"), Intent::JobInquiry);
    }

    #[test]
    fn test_detects_leave_inquiry() {
        assert_eq!(detect_intent("Comment poser un congé?"), Intent::LeaveInquiry);
        assert_eq!(detect_intent("vacation policy question"), Intent::LeaveInquiry);
    }

    #[test]
    fn test_detects_payroll() {
        assert_eq!(detect_intent("Où est ma fiche de paie?"), Intent::PayrollInquiry);
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        assert_eq!(detect_intent("COMBIEN de candidats?"), Intent::GetStatistics);
    }

    #[test]
    fn test_priority_order_search_wins_over_jobs() {
        // "contact" outranks "recruteur"-style job keywords.
        assert_eq!(
            detect_intent("contact pour une candidature"),
            Intent::SearchEmployee
        );
    }

    #[test]
    fn test_unknown_message_is_general() {
        assert_eq!(detect_intent("bonjour"), Intent::GeneralInquiry);
    }

    #[test]
    fn test_every_intent_has_suggestions() {
        for intent in [
            Intent::SearchEmployee,
            Intent::GetStatistics,
            Intent::JobInquiry,
            Intent::LeaveInquiry,
            Intent::PolicyInquiry,
            Intent::TrainingInquiry,
            Intent::PayrollInquiry,
            Intent::GeneralInquiry,
        ] {
            assert!(!suggestions_for(intent).is_empty());
        }
    }
}
