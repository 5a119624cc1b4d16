// src/services/schedule.rs

use chrono::{Datelike, NaiveDate};

// Aritmética de calendário compartilhada pelos ciclos de fatura,
// pelas parcelas e pelas despesas fixas. Tudo aqui é puro.

pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

// Monta uma data prendendo o dia ao tamanho do mês (31 vira 28/29/30 quando preciso)
pub fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.min(last_day_of_month(year, month));

    // Após o clamp o dia sempre existe no mês
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or(NaiveDate::MIN)
}

/// Próxima ocorrência de um dia do mês estritamente à frente de `today`:
/// se o dia ainda não passou neste mês, cai neste mês; senão, no próximo.
pub fn next_occurrence(day_of_month: u32, today: NaiveDate) -> NaiveDate {
    if day_of_month > today.day() {
        clamped_date(today.year(), today.month(), day_of_month)
    } else {
        let (year, month) = if today.month() == 12 {
            (today.year() + 1, 1)
        } else {
            (today.year(), today.month() + 1)
        };
        clamped_date(year, month, day_of_month)
    }
}

/// Avança um vencimento em exatamente um mês de calendário, reancorando no
/// dia original para não acumular o efeito do clamp (31 Jan -> 28 Fev -> 31 Mar).
pub fn advance_one_month(current: NaiveDate, day_of_month: u32) -> NaiveDate {
    let (year, month) = if current.month() == 12 {
        (current.year() + 1, 1)
    } else {
        (current.year(), current.month() + 1)
    };
    clamped_date(year, month, day_of_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn last_day_handles_leap_years() {
        assert_eq!(last_day_of_month(2024, 2), 29);
        assert_eq!(last_day_of_month(2023, 2), 28);
        assert_eq!(last_day_of_month(2024, 12), 31);
        assert_eq!(last_day_of_month(2024, 4), 30);
    }

    #[test]
    fn next_occurrence_stays_in_month_when_day_is_ahead() {
        // due_day > dia de hoje: mesmo mês
        assert_eq!(next_occurrence(20, date(2024, 6, 15)), date(2024, 6, 20));
    }

    #[test]
    fn next_occurrence_rolls_to_next_month_when_day_passed() {
        assert_eq!(next_occurrence(10, date(2024, 6, 15)), date(2024, 7, 10));
        // no próprio dia também rola para o mês seguinte
        assert_eq!(next_occurrence(15, date(2024, 6, 15)), date(2024, 7, 15));
    }

    #[test]
    fn next_occurrence_rolls_over_december() {
        assert_eq!(next_occurrence(5, date(2024, 12, 20)), date(2025, 1, 5));
    }

    #[test]
    fn next_occurrence_is_never_in_the_past_for_any_day() {
        let today = date(2024, 2, 27);
        for day in 1..=31 {
            assert!(next_occurrence(day, today) >= today);
        }
    }

    #[test]
    fn next_occurrence_clamps_short_months() {
        // dia 31 em fevereiro bissexto
        assert_eq!(next_occurrence(31, date(2024, 2, 10)), date(2024, 2, 29));
    }

    #[test]
    fn advance_reanchors_on_the_original_day() {
        // 31 Jan -> 29 Fev (bissexto) -> 31 Mar, sem derrapar para o dia 29
        let feb = advance_one_month(date(2024, 1, 31), 31);
        assert_eq!(feb, date(2024, 2, 29));
        assert_eq!(advance_one_month(feb, 31), date(2024, 3, 31));
    }

    #[test]
    fn advance_is_exactly_one_calendar_month() {
        assert_eq!(advance_one_month(date(2024, 7, 5), 5), date(2024, 8, 5));
        assert_eq!(advance_one_month(date(2024, 12, 5), 5), date(2025, 1, 5));
    }
}
