/// Services known at build time, as `(service id, display name)`.
pub(crate) const KNOWN_SERVICES: &[(&str, &str)] = &[
    ("OB5IBW001180FQ10640", "NABO_Focus"),
    ("OZN379001174FW17905", "NABO_경제재정수첩"),
    ("O13FRZ001177X318752", "NABO_추계_세제_이슈"),
    ("ODI720001121MP14647", "국회도서관_정책에_관한_행정정보_공표"),
    ("O71AP8001122ZZ10743", "국회사무처_정보목록"),
];
