//! Prompt rendering.
//!
//! The template uses `{{key}}` placeholders filled from the structured input, so
//! the same key/value pairs can feed any text-generation backend.

use crate::domain::FinancingInput;

/// Instructions sent as the system message.
pub const SYSTEM_PROMPT: &str = "Vous êtes un conseiller expert en financement automobile. \
Répondez uniquement par un objet JSON de la forme \
{\"recommendation\": \"LOA\" | \"LLD\" | \"Crédit\", \"reasoning\": \"...\"}.";

pub const PROMPT_TEMPLATE: &str = "\
À partir des informations suivantes, recommandez la meilleure option de financement \
pour ce véhicule : LOA, LLD ou Crédit.

Prix du véhicule : {{vehiclePrice}} €
Durée : {{duration}} ans
Kilométrage annuel : {{mileage}} km
Mensualité LOA : {{monthlyPaymentLOA}} €
Mensualité LLD : {{monthlyPaymentLLD}} €
Mensualité Crédit : {{monthlyPaymentCredit}} €
Apport : {{downPayment}} €
Préférence flexibilité : {{preferenceFlexibility}}
Préférence zéro contrainte : {{preferenceZeroConstraint}}
Préférence optimisation des coûts : {{preferenceCostOptimization}}

Points à considérer :
- LOA : flexible, avec une option d'achat en fin de contrat ; mensualités souvent plus basses qu'un crédit.
- LLD : aucune contrainte, entretien simplifié, adaptée à qui change souvent de voiture ; on ne devient jamais propriétaire et les loyers sont payés à perte.
- Crédit : on est propriétaire du véhicule ; le coût total est souvent plus faible si on garde la voiture longtemps, mais l'entretien et la revente sont à sa charge. Un taux élevé rend le crédit moins attractif.

Donnez une recommandation et un raisonnement, en français.
";

/// Placeholder values for one input.
pub fn template_values(input: &FinancingInput) -> Vec<(&'static str, String)> {
    vec![
        ("vehiclePrice", fmt_amount(input.vehicle_price)),
        ("duration", input.duration.to_string()),
        ("mileage", input.mileage.to_string()),
        ("monthlyPaymentLOA", fmt_amount(input.monthly_payment_loa)),
        ("monthlyPaymentLLD", fmt_amount(input.monthly_payment_lld)),
        ("monthlyPaymentCredit", fmt_amount(input.monthly_payment_credit)),
        ("downPayment", fmt_amount(input.down_payment)),
        ("preferenceFlexibility", input.preference_flexibility.as_str().to_string()),
        ("preferenceZeroConstraint", input.preference_zero_constraint.as_str().to_string()),
        ("preferenceCostOptimization", input.preference_cost_optimization.as_str().to_string()),
    ]
}

/// Replace every `{{key}}` with its value. Unknown placeholders are left as-is.
pub fn render_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}

/// The user message for one input.
pub fn render_prompt(input: &FinancingInput) -> String {
    render_template(PROMPT_TEMPLATE, &template_values(input))
}

/// Whole amounts without decimals, others with two.
fn fmt_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Preference;

    fn input() -> FinancingInput {
        FinancingInput {
            vehicle_price: 22000.0,
            down_payment: 2000.0,
            duration: 4,
            mileage: 12000,
            interest_rate: 5.8,
            residual_value_rate: 42.0,
            monthly_payment_credit: 420.0,
            monthly_payment_loa: 280.5,
            monthly_payment_lld: 264.0,
            first_payment_loa: 0.0,
            first_payment_lld: 0.0,
            credit_duration: None,
            preference_flexibility: Preference::Yes,
            preference_zero_constraint: Preference::No,
            preference_cost_optimization: Preference::Yes,
        }
    }

    #[test]
    fn render_fills_every_placeholder() {
        let prompt = render_prompt(&input());
        assert!(!prompt.contains("{{"), "unfilled placeholder in:\n{prompt}");
        assert!(prompt.contains("Prix du véhicule : 22000 €"));
        assert!(prompt.contains("Durée : 4 ans"));
        assert!(prompt.contains("Mensualité LOA : 280.50 €"));
        assert!(prompt.contains("Préférence flexibilité : yes"));
        assert!(prompt.contains("Préférence zéro contrainte : no"));
    }

    #[test]
    fn unknown_placeholders_are_kept() {
        let out = render_template("{{a}} and {{b}}", &[("a", "1".to_string())]);
        assert_eq!(out, "1 and {{b}}");
    }
}
