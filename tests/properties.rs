//! Property tests for the pure calculation core.

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    ProrationFactor, ResolvedInputs, compute_payroll, round_half_up, tax_on_income,
};
use payroll_engine::config::StatutoryDefaults;
use payroll_engine::models::{
    ComponentType, ContributionConfig, Employee, PayrollCalculationInput, PtConfig, PtSlab,
    SalaryComponent, SalaryStructure, StatutoryConfigs, TaxSlab, TdsConfig,
};

fn fixed(name: &str, code: Option<&str>, amount: u32) -> SalaryComponent {
    SalaryComponent {
        name: name.to_string(),
        code: code.map(str::to_string),
        component_type: ComponentType::Fixed,
        amount: Some(Decimal::from(amount)),
        percent: None,
    }
}

fn slabs() -> Vec<TaxSlab> {
    let band = |from: i64, to: Option<i64>, rate: i64| TaxSlab {
        from: Decimal::from(from),
        to: to.map(Decimal::from),
        rate: Decimal::from(rate),
    };
    vec![
        band(0, Some(300_000), 0),
        band(300_000, Some(700_000), 5),
        band(700_000, Some(1_000_000), 10),
        band(1_000_000, Some(1_200_000), 15),
        band(1_200_000, Some(1_500_000), 20),
        band(1_500_000, None, 30),
    ]
}

fn resolved(basic: u32, hra: u32, esi: bool, pt: bool, tds: bool) -> ResolvedInputs {
    ResolvedInputs {
        employee: Employee {
            id: "emp_001".to_string(),
            tenant_id: "acme".to_string(),
            name: "Asha Rao".to_string(),
            ctc_annual: None,
            esi_applicable: esi,
            pt_applicable: pt,
            tds_applicable: tds,
            location_id: None,
        },
        structure: SalaryStructure {
            id: "std".to_string(),
            tenant_id: "acme".to_string(),
            name: "Standard".to_string(),
            components: vec![
                fixed("Basic", Some("BASIC"), basic),
                fixed("HRA", Some("HRA"), hra),
            ],
        },
        location: None,
        pt_state: "Maharashtra".to_string(),
        pt_state_defaulted: false,
        statutory: StatutoryConfigs {
            pf: Some(ContributionConfig {
                wage_ceiling: Decimal::from(15000),
                employee_percent: Decimal::from(12),
                employer_percent: Decimal::from(12),
            }),
            esi: None,
            pt: Some(PtConfig {
                state: "Maharashtra".to_string(),
                slabs: vec![
                    PtSlab {
                        salary_from: Decimal::ZERO,
                        salary_to: Some(Decimal::from(7500)),
                        pt_amount: Decimal::ZERO,
                    },
                    PtSlab {
                        salary_from: Decimal::from(7501),
                        salary_to: None,
                        pt_amount: Decimal::from(200),
                    },
                ],
            }),
            tds: Some(TdsConfig {
                standard_deduction: Some(Decimal::from(75000)),
                tax_slabs: slabs(),
            }),
        },
        tax_declarations: vec![],
    }
}

/// Day counts in half-day steps: (days_worked, total_days).
fn attendance() -> impl Strategy<Value = (Decimal, Decimal)> {
    (1u32..=31).prop_flat_map(|total| {
        (0..=total * 2).prop_map(move |half_days| {
            (Decimal::new(i64::from(half_days) * 5, 1), Decimal::from(total))
        })
    })
}

fn input(days_worked: Decimal, total_days: Decimal) -> PayrollCalculationInput {
    let mut input = PayrollCalculationInput::new("acme", "emp_001", 6, 2025);
    input.days_worked = Some(days_worked);
    input.total_days = Some(total_days);
    input
}

proptest! {
    #[test]
    fn proration_stays_within_bounds(
        (worked, total) in attendance(),
        amount in 0u32..1_000_000,
    ) {
        let factor = ProrationFactor::new(worked, total).unwrap();
        let amount = Decimal::from(amount);

        prop_assert!(factor.value() >= Decimal::ZERO);
        prop_assert!(factor.value() <= Decimal::ONE);
        let prorated = factor.apply(amount).unwrap();
        prop_assert!(prorated <= amount);
        prop_assert!(prorated >= Decimal::ZERO);
    }

    #[test]
    fn net_pay_equals_earnings_minus_deductions(
        (worked, total) in attendance(),
        basic in 0u32..200_000,
        hra in 0u32..100_000,
        esi in any::<bool>(),
        pt in any::<bool>(),
        tds in any::<bool>(),
    ) {
        let result = compute_payroll(
            &input(worked, total),
            &resolved(basic, hra, esi, pt, tds),
            &StatutoryDefaults::default(),
        )
        .unwrap();

        prop_assert_eq!(
            result.gross_deductions,
            result.pf_employee + result.esi_employee + result.pt + result.tds + result.lop_amount
        );
        prop_assert_eq!(result.net_pay, result.gross_earnings - result.gross_deductions);

        let rounded = result.rounded_for_persistence();
        prop_assert_eq!(rounded.net_pay, rounded.gross_earnings - rounded.gross_deductions);
        prop_assert_eq!(rounded.tds, round_half_up(result.tds));
    }

    #[test]
    fn full_attendance_has_no_loss_of_pay(
        total in 1u32..=31,
        basic in 0u32..200_000,
    ) {
        let total = Decimal::from(total);
        let result = compute_payroll(
            &input(total, total),
            &resolved(basic, 0, false, false, false),
            &StatutoryDefaults::default(),
        )
        .unwrap();

        prop_assert_eq!(result.lop_days, Decimal::ZERO);
        prop_assert_eq!(result.lop_amount, Decimal::ZERO);
        prop_assert_eq!(result.gross_earnings, Decimal::from(basic));
    }

    #[test]
    fn income_tax_never_decreases_with_income(
        lower in 0u32..3_000_000,
        raise in 0u32..1_000_000,
    ) {
        let lower = Decimal::from(lower);
        let higher = lower + Decimal::from(raise);

        prop_assert!(
            tax_on_income(lower, &slabs()).unwrap() <= tax_on_income(higher, &slabs()).unwrap()
        );
    }

    #[test]
    fn withholding_never_decreases_as_pay_rises(
        (worked, total) in attendance(),
        basic in 0u32..60_000,
        hra in 0u32..40_000,
        basic_raise in 0u32..60_000,
        hra_raise in 0u32..40_000,
    ) {
        // Basic spans the 15000 PF ceiling, so the PF offset is exercised both
        // while it grows with basic and after it is capped.
        let defaults = StatutoryDefaults::default();
        let input = input(worked, total);

        let lower = compute_payroll(&input, &resolved(basic, hra, false, true, true), &defaults)
            .unwrap();
        let higher = compute_payroll(
            &input,
            &resolved(basic + basic_raise, hra + hra_raise, false, true, true),
            &defaults,
        )
        .unwrap();

        prop_assert!(higher.gross_earnings >= lower.gross_earnings);
        prop_assert!(higher.tds >= lower.tds);
    }

    #[test]
    fn recalculation_is_identical(
        (worked, total) in attendance(),
        basic in 0u32..200_000,
        hra in 0u32..100_000,
    ) {
        let resolved = resolved(basic, hra, true, true, true);
        let input = input(worked, total);

        let first = compute_payroll(&input, &resolved, &StatutoryDefaults::default()).unwrap();
        let second = compute_payroll(&input, &resolved, &StatutoryDefaults::default()).unwrap();

        prop_assert_eq!(first, second);
    }
}
