//! Column-name constants for the forecast inputs and outputs.
//!
//! Single source of truth for every fixed column set the pipeline checks,
//! drops or preserves.

// ── Main (inventory/forecast) extract ───────────────────────────────────────
pub mod forecast {
    pub const ITEM: &str = "Item";
    pub const PLANT_DESC: &str = "Plant Desc";

    /// Key columns that must be present after header cleanup.
    pub const KEYS: [&str; 2] = [ITEM, PLANT_DESC];

    /// Descriptive columns with no downstream meaning. All must exist.
    pub const DROPPED: [&str; 7] = [
        "Trademark",
        "Cluster Qty",
        "Container Size",
        "Deposit",
        "Wind",
        "Design Style",
        "Lane",
    ];
}

// ── Reference (conversion) table ────────────────────────────────────────────
pub mod reference {
    pub const ITEM: &str = "Pepsi Item# (RMID#)";
    pub const PLANT_DESC: &str = "Pepsi Plant Desc";
    pub const SUPPLIER_DESC: &str = "Supplier Desc";
    pub const ITEM_DESC: &str = "Pepsi Item Desc";

    pub const KEYS: [&str; 2] = [ITEM, PLANT_DESC];

    /// Reference columns removed once the join has been made.
    pub const DROPPED_AFTER_JOIN: [&str; 3] = [SUPPLIER_DESC, ITEM_DESC, PLANT_DESC];
}

// ── Conversion divisors ─────────────────────────────────────────────────────
pub mod divisors {
    pub const IM_PER_LF: &str = "IM/LF";
    pub const LF_PER_LB: &str = "LF/LB";

    pub const ALL: [&str; 2] = [IM_PER_LF, LF_PER_LB];
}

// ── Long (reshaped) table ───────────────────────────────────────────────────
pub mod long {
    pub const WEEK: &str = "Week";
    pub const IM: &str = "IM";
    pub const LF: &str = "LF";
    pub const LB: &str = "LB";

    /// Header format of the per-week columns (`01/06/25`).
    pub const WEEK_FORMAT: &str = "%m/%d/%y";

    /// Columns carried onto every reshaped row. Any other column of the
    /// joined table is a per-week measurement column.
    pub const IDENTIFYING: [&str; 21] = [
        "Supplier",
        "Item",
        "SAP Item Number",
        "Item Category",
        "UOM",
        "Plant",
        "SAP Plant Number",
        "Plant Desc",
        "QTY Open POs QTY with Supplier",
        "Quantity Onhand",
        "Scheduled Receipts",
        "Past Due Orders",
        "Safety Stock",
        "IM/LF",
        "LF/LB",
        "Special Record",
        "Pepsi Item# (RMID#)",
        "Current J# w/Fcst",
        "Berry Item Desc",
        "Country",
        "Item Desc",
    ];
}

// ── Calendar dimension ──────────────────────────────────────────────────────
pub mod calendar {
    pub const CALENDAR_DATE: &str = "CalendarDate";

    /// Calendar attributes redundant with the retained ones. Missing entries
    /// are ignored.
    pub const PRUNED: [&str; 53] = [
        "DateSid",
        "FiscalQuarter",
        "PostingPeriod",
        CALENDAR_DATE,
        "CalendarYear",
        "CalendarQuarter",
        "CalendarMonth",
        "CalendarWeek",
        "CalendarDay",
        "CalendarWeekday",
        "PostingPeriodStartDate",
        "PostingPeriodEndDate",
        "FiscalWeek",
        "WeekEndDatetime",
        "WorkDay",
        "PeriodTotalWorkDays",
        "PeriodActualWorkDay",
        "PeriodTotalDays",
        "WeeksinPeriod",
        "WeekinPeriod",
        "FiscalYearMonth",
        "FiscalYearQuarter",
        "CalendarYearMonth",
        "PeriodNameLong",
        "CalendarWeekofMonth",
        "CalendarDayofWeek",
        "FiscalDate",
        "JulianDate",
        "CalendarFiscalPeriod",
        "SerialWeek",
        "SerialDay",
        "SerialDayExcludingWeekends",
        "SerialWorkingDay",
        "DayofFiscalYear",
        "DayofPeriod",
        "DaysInYear",
        "CalendarMonthNameLong",
        "CalendarMonthNameShort",
        "CalendarNameYear",
        "InLastXFiscalYears",
        "InLastXFiscalQuarters",
        "InLastXPeriods",
        "InLastXWeeks",
        "InLastXDays",
        "JoinKey",
        "FiscalPeriodSid",
        "FiscalQuarterSid",
        "CalendarMonthSid",
        "CalendarQuarterSid",
        "CalendarQuarterAllSid",
        "InLastXCalendarYears",
        "InLastXCalendarQuarters",
        "InLastXMonths",
    ];
}

// ── Export ──────────────────────────────────────────────────────────────────
pub mod export {
    pub const XLSX_MIME_TYPE: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
    pub const DEFAULT_PRODUCT_LABEL: &str = "Pepsi";
    pub const FILENAME_DATE_FORMAT: &str = "%Y-%m-%d";
}
