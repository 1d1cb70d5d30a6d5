//! Common BSL source fixtures for tests.

pub const MODULE_WITHOUT_REGIONS: &str = "\
Процедура А()
КонецПроцедуры";

pub const MODULE_IN_REGIONS: &str = "\
#Область ПеременныеМодуля
Перем Счетчик;
#КонецОбласти

#Область ПрограммныйИнтерфейс

Процедура Увеличить() Экспорт
    Счетчик = Счетчик + 1;
КонецПроцедуры

#КонецОбласти

#Область Инициализация
Счетчик = 0;
#КонецОбласти";

pub const METHOD_OUTSIDE_REGION: &str = "\
#Область Публичный
Процедура А() Экспорт
КонецПроцедуры
#КонецОбласти

Процедура Б()
КонецПроцедуры";

pub const MODULE_VAR_OUTSIDE_REGION: &str = "\
Перем А;
#Область Переменные
Перем Б;
#КонецОбласти";

pub const STATEMENT_IN_CONDITIONAL_COMPILATION: &str = "\
#Область Основная
#КонецОбласти
#Если Сервер Тогда
А = 1;
#КонецЕсли";

pub const BRANCHY_METHOD: &str = "\
Функция Оценка(Значение)
    Если Значение > 10 Тогда
        Возврат \"много\";
    ИначеЕсли Значение > 0 Тогда
        Возврат \"мало\";
    КонецЕсли;
    Возврат \"ничего\";
КонецФункции";
